pub mod logger;

use validator::ValidationErrors;

/// Flattens `validator` errors into a single `field: message` line.
///
/// Errors without a message fall back to their code so nothing is silently dropped.
/// Fields are sorted so the output is stable across runs.
pub fn format_validation_errors(errors: &ValidationErrors) -> String {
    let mut fields: Vec<_> = errors.field_errors().into_iter().collect();
    fields.sort_by(|a, b| a.0.cmp(&b.0));

    fields
        .into_iter()
        .flat_map(|(field, errs)| {
            errs.iter().map(move |e| {
                let message = e
                    .message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| e.code.to_string());
                format!("{field}: {message}")
            })
        })
        .collect::<Vec<_>>()
        .join("; ")
}
