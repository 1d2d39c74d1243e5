pub mod aggregate;
pub mod charts;
pub mod export;
pub mod pipeline;
pub mod url;

pub use aggregate::{build_records, calculate_score, classify, mean_polarity, summarize};
pub use charts::{polarity_histogram, polarity_timeline, Gauge, HistogramBin, TimelinePoint, HISTOGRAM_BINS};
pub use export::{export_to_file, read_csv, to_csv_string, write_csv, CSV_HEADER};
pub use pipeline::{run_pipeline, validate_url, FetchOutcome, Pipeline};
pub use url::extract_video_id;
