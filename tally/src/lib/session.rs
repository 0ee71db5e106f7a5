use depot::*;
use crate::{compare::{self, Family}, csv, export, plot, table, utils::*};

/// Where and how results are persisted.
#[derive(Clone, Debug)]
pub struct Options {
    /// Directory receiving CSV, JSON and PNG files.
    pub output: PathBuf,
    pub json:   bool,
    pub plot:   bool,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            output: PathBuf::from("output"),
            json:   false,
            plot:   false,
        }
    }
}

/// One loaded workload plus the engines that keep state between
/// runs. The allocator and the disk scheduler are built once, so
/// the Next-Fit cursor and the head position carry over from one
/// command to the next for as long as the session lives.
pub struct Session {
    workload:   Workload,
    memory:     MemoryAllocator,
    disk:       DiskScheduler,
    options:    Options,
}

impl Session {
    pub fn new(workload: Workload, options: Options) -> Self {
        Self {
            memory: workload.memory(),
            disk:   workload.disk(),
            workload,
            options,
        }
    }

    pub fn workload(&self) -> &Workload {
        &self.workload
    }

    pub fn options(&self) -> &Options {
        &self.options
    }

    pub fn head(&self) -> Cylinder {
        self.disk.head()
    }

    pub fn next_fit_index(&self) -> usize {
        self.memory.next_fit_index()
    }

    pub fn cpu<W: Write>(&self, algorithm: CpuAlgorithm, out: &mut W) -> Result<CpuRun> {
        let run = self.workload.cpu().run(algorithm);
        write!(out, "{}", table::cpu_report(&run))?;

        ensure_dir(&self.options.output)?;
        let path = csv::write_cpu(&self.options.output, &run)?;
        writeln!(out, "\nResults saved to {}", path.display())?;
        if self.options.json {
            let path = artifact(&self.options.output, algorithm.file_stem(), "cpu", "json");
            export::write_json(&path, &export::CpuReport::from(&run))?;
            writeln!(out, "JSON saved to {}", path.display())?;
        }
        if self.options.plot {
            let path = self.options.output.join(format!("{}_gantt.png", algorithm.file_stem()));
            plot::gantt(&run, &path)?;
            writeln!(out, "Chart saved to {}", path.display())?;
        }

        Ok(run)
    }

    pub fn memory<W: Write>(&mut self, fit: Fit, out: &mut W) -> Result<AllocationRun> {
        let run = self.memory.allocate(fit);
        write!(out, "{}", table::memory_report(&run))?;

        ensure_dir(&self.options.output)?;
        let path = csv::write_memory(&self.options.output, &run)?;
        writeln!(out, "\nResults saved to {}", path.display())?;
        if self.options.json {
            let path = artifact(&self.options.output, fit.file_stem(), "memory", "json");
            export::write_json(&path, &export::MemoryReport::from(&run))?;
            writeln!(out, "JSON saved to {}", path.display())?;
        }

        Ok(run)
    }

    pub fn disk<W: Write>(&mut self, algorithm: DiskAlgorithm, out: &mut W) -> Result<SeekRun> {
        let run = self.disk.run(algorithm);
        write!(out, "{}", table::disk_report(&run))?;

        ensure_dir(&self.options.output)?;
        let path = csv::write_disk(&self.options.output, &run, self.disk.requests())?;
        writeln!(out, "\nResults saved to {}", path.display())?;
        if self.options.json {
            let path = artifact(&self.options.output, algorithm.file_stem(), "disk", "json");
            export::write_json(&path, &export::DiskReport::from(&run))?;
            writeln!(out, "JSON saved to {}", path.display())?;
        }
        if self.options.plot {
            let path = self.options.output.join(format!("{}_seek.png", algorithm.file_stem()));
            plot::seek(&run, self.disk.disk_size(), &path)?;
            writeln!(out, "Chart saved to {}", path.display())?;
        }

        Ok(run)
    }

    /// Prints a side-by-side table of every algorithm in `family`.
    /// Session state is left untouched.
    pub fn compare<W: Write>(
        &self,
        family:     Family,
        quantum:    NonZeroUsize,
        direction:  Direction,
        out:        &mut W,
    ) -> Result<()> {
        let start = std::time::Instant::now();
        let summary = match family {
            Family::Cpu     => { table::cpu_summary(&compare::cpu(&self.workload, quantum)) },
            Family::Memory  => { table::memory_summary(&compare::memory(&self.workload)) },
            Family::Disk    => { table::disk_summary(&compare::disk(&self.workload, direction)) },
        };
        info!("{family:?} comparison took {} μs", start.elapsed().as_micros());
        write!(out, "{summary}")?;

        Ok(())
    }
}
