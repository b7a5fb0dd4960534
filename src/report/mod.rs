mod formatter;

pub use formatter::{FlowReport, ReportFormatter, SCHEMA_DESCRIPTION};
