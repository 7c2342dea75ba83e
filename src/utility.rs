//! Utilities
use std::{collections::HashMap, env, fs, io::Write, path::{Path, PathBuf}};
use anyhow::{bail, Context, Result};
use log::*;
use crate::dates::{self, PointInTime};

pub const LOG_FILE_VARIABLE: &str = "LOGBROWSER_LOG_FILE";

/// Determine the log file to read.
///
/// The `--log-file` argument wins, then `LOGBROWSER_LOG_FILE` from the environment or `.env`.
/// There is no default: without either, this fails.
pub fn set_log_file(
    option: &Option<String>,
    changed_options: &mut HashMap<&str, String>,
) -> Result<PathBuf>
{
    let log_file = match option {
        Some(log_file) => {
            info!("log-file argument set: using: {}", log_file);
            changed_options.insert(LOG_FILE_VARIABLE, log_file.to_string());
            log_file.to_string()
        },
        None => match env::var(LOG_FILE_VARIABLE) {
            Ok(set_var) => {
                info!("log-file not set: set via .env: {}: {}", LOG_FILE_VARIABLE, set_var);
                changed_options.insert(LOG_FILE_VARIABLE, set_var.to_owned());
                set_var
            },
            Err(_e) => bail!("No log file: use --log-file or set {} in .env", LOG_FILE_VARIABLE),
        },
    };
    Ok(PathBuf::from(log_file))
}

/// Parse a date range boundary given on the command line, or use the default.
pub fn set_boundary(
    option: &Option<String>,
    default: PointInTime,
) -> Result<PointInTime>
{
    match option {
        Some(text) => dates::parse_point_in_time(text)
            .with_context(|| format!("Invalid date boundary: {}", text)),
        None => Ok(default),
    }
}

/// Write the options that were used to `.env` in the current directory, so a next run picks them up.
pub fn dotenv_writer(
    write_dotenv: bool,
    changed_options: HashMap<&str, String>,
) -> Result<()>
{
    if !changed_options.is_empty() && write_dotenv {
        info!("Writing .env file");
        write_dotenv_file(Path::new(".env"), changed_options)?;
    }
    Ok(())
}

fn write_dotenv_file(
    dotenv_path: &Path,
    changed_options: HashMap<&str, String>,
) -> Result<()>
{
    let mut file = fs::OpenOptions::new()
        .create(true)
        .write(true)
        .truncate(true)
        .open(dotenv_path)
        .with_context(|| format!("Error writing .env file: {}", dotenv_path.display()))?;

    for (key, value) in changed_options {
        file.write_all(format!("{}={}\n", key, value).as_bytes())?;
        info!("{}={}", key, value);
    }
    Ok(())
}
