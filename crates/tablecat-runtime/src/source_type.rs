//! Reconstruction of backend source-type strings.

use crate::connection::DriverError;

/// Rebuild a source type from the raw type name and the optional size and
/// precision the driver reported as text.
///
/// Returns `TYPE(size, precision)`, `TYPE(size)` or `TYPE`. A size or
/// precision of zero or less counts as absent. Precision without a size is
/// dropped. Text that is not an integer is a [`DriverError::data`] failure.
pub fn build_source_type(
    type_name: &str,
    size: Option<&str>,
    precision: Option<&str>,
) -> Result<String, DriverError> {
    let size = parse_positive(size, "Size")?;
    let precision = parse_positive(precision, "Precision")?;

    Ok(match (size, precision) {
        (Some(size), Some(precision)) => format!("{type_name}({size}, {precision})"),
        (Some(size), None) => format!("{type_name}({size})"),
        (None, _) => type_name.to_string(),
    })
}

/// Parse a driver-reported numeric field, treating values below 1 as absent.
pub(crate) fn parse_positive(text: Option<&str>, field: &str) -> Result<Option<u32>, DriverError> {
    let Some(text) = text else {
        return Ok(None);
    };
    let value: i32 = text.parse().map_err(|e| {
        DriverError::data(format!(
            "{field} field could not be converted to integer: {text:?}"
        ))
        .with_source(e)
    })?;
    Ok(u32::try_from(value).ok().filter(|v| *v > 0))
}
