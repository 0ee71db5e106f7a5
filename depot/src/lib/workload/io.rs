use std::str::FromStr;

use crate::utils::*;
use crate::{DiskRequest, StorageBlock, Task};
use super::{init, Workload, WorkloadConfig, HEADER_LEN};

/// Where the driver keeps its workload unless told otherwise.
pub const DEFAULT_PATH: &str = "data/warehouse_data.txt";

const SEPARATOR: &str = "---";

/// Saves `workload` as plain text:
///
/// ```text
/// <10 configuration lines, one number each>
/// id,arrival,burst,priority       (one line per task)
/// ---
/// block_id,size                   (one line per block)
/// ---
/// request_id,cylinder,arrival     (one line per request)
/// ```
pub fn save(workload: &Workload, path: &Path) -> Result<(), WorkloadError> {
    if let Some(dir) = path.parent() {
        if !dir.as_os_str().is_empty() {
            std::fs::create_dir_all(dir)?;
        }
    }
    let mut writer = BufWriter::new(File::create(path)?);
    write_to(workload, &mut writer)?;
    writer.flush()?;
    info!("Workload saved to {}", path.display());

    Ok(())
}

pub fn write_to<W: Write>(workload: &Workload, w: &mut W) -> std::io::Result<()> {
    for v in workload.config.header() {
        writeln!(w, "{v}")?;
    }
    for t in &workload.tasks {
        writeln!(w, "{},{},{},{}", t.id, t.arrival_time, t.burst_time, t.priority)?;
    }
    writeln!(w, "{SEPARATOR}")?;
    for b in &workload.blocks {
        writeln!(w, "{},{}", b.block_id, b.size)?;
    }
    writeln!(w, "{SEPARATOR}")?;
    for r in &workload.requests {
        writeln!(w, "{},{},{}", r.request_id, r.cylinder, r.arrival_time)?;
    }

    Ok(())
}

pub fn load(path: &Path) -> Result<Workload, WorkloadError> {
    let fd = File::open(path)?;

    read_from(BufReader::new(fd))
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum Section {
    Header,
    Tasks,
    Blocks,
    Requests,
}

/// Parses the format written by [`write_to`]. Blank lines are
/// ignored; the result is validated before being handed out.
pub fn read_from<R: BufRead>(reader: R) -> Result<Workload, WorkloadError> {
    let mut header: Vec<usize> = Vec::with_capacity(HEADER_LEN);
    let mut tasks = vec![];
    let mut blocks = vec![];
    let mut requests = vec![];
    let mut section = Section::Header;
    let mut last_line = 0;

    for (idx, line) in reader.lines().enumerate() {
        let line_no = idx + 1;
        last_line = line_no;
        let line = line?;
        let line = line.trim();
        if line.is_empty() { continue; }

        match section {
            Section::Header     => {
                let [v] = fields::<usize, 1>(line, line_no)?;
                header.push(v);
                if header.len() == HEADER_LEN {
                    section = Section::Tasks;
                }
            },
            Section::Tasks      => {
                if line == SEPARATOR {
                    section = Section::Blocks;
                    continue;
                }
                let [id, arrival, burst, priority] = fields::<usize, 4>(line, line_no)?;
                tasks.push(Task::new(to_id(id, line_no)?, arrival, burst, to_id(priority, line_no)?));
            },
            Section::Blocks     => {
                if line == SEPARATOR {
                    section = Section::Requests;
                    continue;
                }
                let [id, size] = fields::<usize, 2>(line, line_no)?;
                blocks.push(StorageBlock::new(to_id(id, line_no)?, size));
            },
            Section::Requests   => {
                let [id, cylinder, arrival] = fields::<usize, 3>(line, line_no)?;
                requests.push(DiskRequest::new(to_id(id, line_no)?, cylinder, arrival));
            },
        }
    }

    if section != Section::Requests {
        return Err(WorkloadError::Parse {
            line:       last_line,
            message:    String::from("unexpected end of file"),
        });
    }
    let mut h = [0; HEADER_LEN];
    h.copy_from_slice(&header);
    let config = WorkloadConfig::from_header(h)?;

    init(config, tasks, blocks, requests)
}

/// Splits `line` on commas and parses exactly `N` fields.
fn fields<T, const N: usize>(line: &str, line_no: usize) -> Result<[T; N], WorkloadError>
where T: FromStr + Default + Copy, T::Err: fmt::Display {
    let mut res = [T::default(); N];
    let mut parts = line.split(',');
    for slot in res.iter_mut() {
        let raw = parts.next().ok_or_else(|| WorkloadError::Parse {
            line:       line_no,
            message:    format!("expected {N} comma-separated fields"),
        })?;
        *slot = raw.trim().parse::<T>().map_err(|e| WorkloadError::Parse {
            line:       line_no,
            message:    format!("{raw:?}: {e}"),
        })?;
    }
    if parts.next().is_some() {
        return Err(WorkloadError::Parse {
            line:       line_no,
            message:    format!("expected {N} comma-separated fields"),
        });
    }

    Ok(res)
}

fn to_id(v: usize, line_no: usize) -> Result<u32, WorkloadError> {
    u32::try_from(v).map_err(|_| WorkloadError::Parse {
        line:       line_no,
        message:    format!("{v} does not fit in 32 bits"),
    })
}
