//! Output writers: labeled rows as an Arrow IPC file, summary as JSON.
//!
//! Both files are first written under a `.partial` name in the output
//! directory and renamed once both succeeded, so a failed run leaves
//! neither behind.

use arrow::array::{BooleanBuilder, RecordBatch, StringBuilder, UInt64Builder};
use arrow::datatypes::{DataType, Field, Schema, SchemaRef};
use arrow::ipc::writer::FileWriter;
use std::ffi::OsString;
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use super::aggregate::PipelineSummary;
use crate::error::AppError;
use crate::models::LabeledQuery;

const PARTIAL_SUFFIX: &str = ".partial";

/// Schema of the labeled dataset
pub fn labeled_schema() -> SchemaRef {
    Arc::new(Schema::new(vec![
        Field::new("session_id", DataType::Utf8, false),
        Field::new("query", DataType::Utf8, true),
        Field::new("session_length", DataType::UInt64, false),
        Field::new("num_user_messages", DataType::UInt64, false),
        Field::new("intent", DataType::Utf8, false),
        Field::new("funnel_stage", DataType::Utf8, false),
        Field::new("brand_mentioned", DataType::Utf8, false),
        Field::new("is_support", DataType::Boolean, false),
    ]))
}

/// Build one record batch holding every labeled row
pub fn labeled_batch(rows: &[LabeledQuery]) -> Result<RecordBatch, AppError> {
    let total = rows.len();

    let mut session_id_builder = StringBuilder::with_capacity(total, total * 36);
    let mut query_builder = StringBuilder::with_capacity(total, total * 128);
    let mut length_builder = UInt64Builder::with_capacity(total);
    let mut user_count_builder = UInt64Builder::with_capacity(total);
    let mut intent_builder = StringBuilder::with_capacity(total, total * 16);
    let mut funnel_builder = StringBuilder::with_capacity(total, total * 12);
    let mut brand_builder = StringBuilder::with_capacity(total, total * 8);
    let mut support_builder = BooleanBuilder::with_capacity(total);

    for row in rows {
        session_id_builder.append_value(&row.session_id);
        query_builder.append_option(row.query());
        length_builder.append_value(row.session_length);
        user_count_builder.append_value(row.num_user_messages);
        intent_builder.append_value(row.labels.intent.label());
        funnel_builder.append_value(row.labels.funnel_stage.label());
        brand_builder.append_value(row.labels.brand.as_str());
        support_builder.append_value(row.labels.is_support);
    }

    let batch = RecordBatch::try_new(
        labeled_schema(),
        vec![
            Arc::new(session_id_builder.finish()),
            Arc::new(query_builder.finish()),
            Arc::new(length_builder.finish()),
            Arc::new(user_count_builder.finish()),
            Arc::new(intent_builder.finish()),
            Arc::new(funnel_builder.finish()),
            Arc::new(brand_builder.finish()),
            Arc::new(support_builder.finish()),
        ],
    )?;

    Ok(batch)
}

/// Write the labeled rows to an Arrow IPC file
pub fn write_labeled(path: &Path, rows: &[LabeledQuery]) -> Result<(), AppError> {
    let batch = labeled_batch(rows)?;
    let file = File::create(path)?;

    let mut writer = FileWriter::try_new(file, &batch.schema())?;
    writer.write(&batch)?;
    writer.finish()?;

    Ok(())
}

/// Write the summary as pretty-printed JSON
pub fn write_summary(path: &Path, summary: &PipelineSummary) -> Result<(), AppError> {
    let mut file = BufWriter::new(File::create(path)?);
    serde_json::to_writer_pretty(&mut file, summary)?;
    file.write_all(b"\n")?;
    file.flush()?;
    Ok(())
}

fn partial_path(path: &Path) -> PathBuf {
    let mut name = OsString::from(path.as_os_str());
    name.push(PARTIAL_SUFFIX);
    PathBuf::from(name)
}

fn remove_if_exists(path: &Path) {
    if path.is_file() {
        let _ = fs::remove_file(path);
    }
}

/// Write the labeled dataset and the summary, both or neither
pub fn write_outputs(
    labeled_path: &Path,
    summary_path: &Path,
    rows: &[LabeledQuery],
    summary: &PipelineSummary,
) -> Result<(), AppError> {
    let staged_labeled = partial_path(labeled_path);
    let staged_summary = partial_path(summary_path);

    let result = stage_and_commit(
        &staged_labeled,
        labeled_path,
        &staged_summary,
        summary_path,
        rows,
        summary,
    );

    remove_if_exists(&staged_labeled);
    remove_if_exists(&staged_summary);
    result
}

fn stage_and_commit(
    staged_labeled: &Path,
    labeled_path: &Path,
    staged_summary: &Path,
    summary_path: &Path,
    rows: &[LabeledQuery],
    summary: &PipelineSummary,
) -> Result<(), AppError> {
    write_labeled(staged_labeled, rows)?;
    write_summary(staged_summary, summary)?;

    fs::rename(staged_labeled, labeled_path)?;
    if let Err(e) = fs::rename(staged_summary, summary_path) {
        remove_if_exists(labeled_path);
        return Err(e.into());
    }

    Ok(())
}
