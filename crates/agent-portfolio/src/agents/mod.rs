//! The two model-backed agents of the pipeline

pub mod news_sentiment;
pub mod report_writer;

pub use news_sentiment::{NewsAnalyst, NewsSentimentGenerator};
pub use report_writer::{ReportGenerator, ReportWriter};

#[cfg(test)]
pub use news_sentiment::MockNewsAnalyst;
#[cfg(test)]
pub use report_writer::MockReportWriter;
