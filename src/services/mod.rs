pub mod csv;
pub mod report_service;

pub use report_service::{DomainReportRow, KeywordReportQuery, ReportService, Summary};
