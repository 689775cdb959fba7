//! Query parameters and their validation.
//!
//! Parameters arrive either typed ([`SubmissionsByStudentsParams::new`]) or as an untyped
//! JSON object ([`SubmissionsByStudentsParams::parse`]). Both routes end in the same
//! [`Validate`] check, which must pass before anything is sent over the network.

use std::borrow::Cow;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use validator::{Validate, ValidationError, ValidationErrors};

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct SubmissionsByStudentsParams {
    #[validate(length(min = 1, message = "courseId must be a non-empty string"))]
    pub course_id: String,

    #[validate(custom(function = validate_student_ids))]
    pub student_ids: Vec<String>,
}

fn validate_student_ids(ids: &Vec<String>) -> Result<(), ValidationError> {
    if let Some(index) = ids.iter().position(|id| id.is_empty()) {
        let mut err = ValidationError::new("empty_student_id")
            .with_message(Cow::from("studentIds must contain only non-empty strings"));
        err.add_param(Cow::from("index"), &index);
        return Err(err);
    }
    Ok(())
}

fn type_error(code: &'static str, message: &'static str) -> ValidationError {
    ValidationError::new(code).with_message(Cow::from(message))
}

impl SubmissionsByStudentsParams {
    pub fn new<I, S>(course_id: impl Into<String>, student_ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            course_id: course_id.into(),
            student_ids: student_ids.into_iter().map(Into::into).collect(),
        }
    }

    /// Checks an untyped parameter object and converts it into validated parameters.
    ///
    /// Missing fields and wrong types are reported per field, the same way an empty
    /// `courseId` is, so callers only ever see [`ValidationErrors`] here.
    pub fn parse(value: &Value) -> Result<Self, ValidationErrors> {
        let mut errors = ValidationErrors::new();

        let course_id = match value.get("courseId") {
            Some(Value::String(s)) => Some(s.clone()),
            _ => {
                errors.add(
                    "course_id",
                    type_error("type", "courseId must be a non-empty string"),
                );
                None
            }
        };

        let student_ids = match value.get("studentIds") {
            Some(Value::Array(items)) => {
                let ids: Option<Vec<String>> = items
                    .iter()
                    .map(|item| item.as_str().map(str::to_string))
                    .collect();
                if ids.is_none() {
                    errors.add(
                        "student_ids",
                        type_error("type", "studentIds must contain only non-empty strings"),
                    );
                }
                ids
            }
            _ => {
                errors.add(
                    "student_ids",
                    type_error("type", "studentIds must be an array of strings"),
                );
                None
            }
        };

        match (course_id, student_ids) {
            (Some(course_id), Some(student_ids)) if errors.is_empty() => {
                let params = Self {
                    course_id,
                    student_ids,
                };
                params.validate()?;
                Ok(params)
            }
            _ => Err(errors),
        }
    }

    /// GraphQL variables for the submissions query.
    pub fn to_variables(&self) -> Value {
        serde_json::json!({
            "courseId": self.course_id,
            "studentIds": self.student_ids,
        })
    }
}
