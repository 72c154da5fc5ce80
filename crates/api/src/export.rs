//! CSV/zip report bundle for the production data.
//!
//! Mirrors the legacy export: one sheet with every record plus one sheet per
//! worker, bundled into a deflated zip. Sheets are CSV; technical columns
//! (`id`, `created_at`) are omitted. Flags are written back as the `"X"`
//! presence marker so the sheets read like the ones the workshop is used to.

use std::io::{Cursor, Write};

use stitchtrack_core::record::{flag, ProductionRecord};
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipWriter};

/// Column headers shared by every sheet.
const HEADER: &str = "Order,Worker,Date,Quantity,Stitches,\
Front,Side,Back,Cap,Bowl,Visor,Embroidery,Paint Application,Engraving Application";

/// Build the export zip: `production_full.csv` plus `<worker>.csv` for each
/// distinct worker, in first-occurrence order.
pub fn build_export_zip(records: &[ProductionRecord]) -> zip::result::ZipResult<Vec<u8>> {
    let mut writer = ZipWriter::new(Cursor::new(Vec::new()));
    let options = SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);

    writer.start_file("production_full.csv", options)?;
    writer.write_all(sheet(records.iter()).as_bytes())?;

    let mut workers: Vec<&str> = Vec::new();
    for record in records {
        let worker = record.worker_or_unknown();
        if !workers.contains(&worker) {
            workers.push(worker);
        }
    }

    for worker in workers {
        let name = format!("{}.csv", sanitize_entry_name(worker));
        writer.start_file(name, options)?;
        let rows = records.iter().filter(|r| r.worker_or_unknown() == worker);
        writer.write_all(sheet(rows).as_bytes())?;
    }

    Ok(writer.finish()?.into_inner())
}

/// Render one CSV sheet for the given records.
fn sheet<'a>(records: impl Iterator<Item = &'a ProductionRecord>) -> String {
    let mut csv = String::from(HEADER);
    csv.push('\n');
    for record in records {
        let flags = [
            record.front,
            record.side,
            record.back,
            record.cap,
            record.bowl,
            record.visor,
            record.embroidery,
            record.paint_application,
            record.engraving_application,
        ]
        .map(|set| if set { flag::MARKER } else { "" })
        .join(",");

        csv.push_str(&format!(
            "{},{},{},{},{},{}\n",
            escape(&record.order_id),
            escape(&record.worker),
            escape(&record.date),
            escape(&record.quantity),
            escape(&record.stitch_count),
            flags,
        ));
    }
    csv
}

/// Quote a CSV field when it contains a comma, quote, or newline.
fn escape(field: &str) -> String {
    if field.contains([',', '"', '\n']) {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}

/// Make a worker name safe as a zip entry name.
fn sanitize_entry_name(name: &str) -> String {
    name.chars()
        .map(|c| match c {
            ' ' => '_',
            '/' | '\\' => '-',
            other => other,
        })
        .collect()
}
