/// Display helpers
///
/// Turn stored photo metadata into the human readable labels shown
/// next to a photo under inspection.

use chrono::{DateTime, Local, TimeZone, Utc};

use crate::state::data::{PhotoDetails, PhotoRecord};

const SIZE_UNITS: [&str; 4] = ["Bytes", "KB", "MB", "GB"];

/// Format a byte count using base-1024 units, e.g. `1.5 MB`.
pub fn format_file_size(bytes: u64) -> String {
    if bytes == 0 {
        return "0 Bytes".to_string();
    }

    let mut value = bytes as f64;
    let mut unit = 0;
    while value >= 1024.0 && unit < SIZE_UNITS.len() - 1 {
        value /= 1024.0;
        unit += 1;
    }

    // Two decimals at most, no trailing zeros
    let formatted = format!("{:.2}", value);
    let trimmed = formatted.trim_end_matches('0').trim_end_matches('.');
    format!("{} {}", trimmed, SIZE_UNITS[unit])
}

/// Short label for a MIME type
pub fn type_label(mime_type: &str) -> &'static str {
    match mime_type {
        "image/jpeg" => "JPEG",
        "image/jpg" => "JPG",
        "image/png" => "PNG",
        "image/webp" => "WebP",
        "image/gif" => "GIF",
        _ => "Unknown format",
    }
}

/// Format an upload time in the local timezone.
pub fn format_date(date: &DateTime<Utc>) -> String {
    format_date_in(date, &Local)
}

fn format_date_in<Tz: TimeZone>(date: &DateTime<Utc>, tz: &Tz) -> String
where
    Tz::Offset: std::fmt::Display,
{
    date.with_timezone(tz).format("%B %-d, %Y %H:%M").to_string()
}

/// Everything the detail view needs for the photo at `index`
pub fn photo_details(index: usize, photo: &PhotoRecord) -> PhotoDetails {
    PhotoDetails {
        index,
        name: photo.name.clone(),
        data: photo.data.clone(),
        size_label: format_file_size(photo.size),
        type_label: type_label(&photo.mime_type).to_string(),
        date_label: format_date(&photo.upload_date),
    }
}
