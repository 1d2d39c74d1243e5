use commentscope_core::{CommentRecord, CoreError};
use std::fs::File;
use std::io::{Read, Write};
use std::path::Path;
use tracing::info;

pub const CSV_HEADER: [&str; 5] = ["Author", "Comment", "Likes", "Time", "Sentiment"];

/// Writes a header row followed by one row per record, in the given order.
pub fn write_csv<W: Write>(records: &[CommentRecord], writer: W) -> Result<(), CoreError> {
    let mut csv_writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(writer);

    // Written by hand so an empty export still carries the header.
    csv_writer.write_record(CSV_HEADER)?;
    for record in records {
        csv_writer.serialize(record)?;
    }
    csv_writer.flush()?;
    Ok(())
}

pub fn to_csv_string(records: &[CommentRecord]) -> Result<String, CoreError> {
    let mut buffer = Vec::new();
    write_csv(records, &mut buffer)?;
    String::from_utf8(buffer).map_err(|e| CoreError::Internal {
        message: format!("CSV output is not UTF-8: {}", e),
    })
}

pub fn read_csv<R: Read>(reader: R) -> Result<Vec<CommentRecord>, CoreError> {
    let mut csv_reader = csv::Reader::from_reader(reader);
    let mut records = Vec::new();
    for row in csv_reader.deserialize() {
        records.push(row?);
    }
    Ok(records)
}

pub fn export_to_file(records: &[CommentRecord], path: &Path) -> Result<(), CoreError> {
    let file = File::create(path)?;
    write_csv(records, file)?;
    info!("Exported {} records to {}", records.len(), path.display());
    Ok(())
}
