use dispatch_core::error::DispatchError;
use dispatch_core::model::Job;
use serde::Serialize;
use std::path::Path;

pub fn print<T: Serialize>(value: &T) -> Result<(), DispatchError> {
    let json = serde_json::to_string_pretty(value)?;
    println!("{json}");
    Ok(())
}

pub fn write_jobs(path: &Path, jobs: &[Job]) -> Result<(), DispatchError> {
    let json = serde_json::to_string_pretty(jobs)?;
    std::fs::write(path, json)?;
    Ok(())
}
