use clap::{Parser, Subcommand, ValueEnum};

use depot::*;
use tally::{menu, utils::*, Family, Options, Session};

/// A warehouse operating-system simulator: orders are scheduled on
/// workers (CPU scheduling), stored in racks (memory allocation) and
/// picked up by trucks served by a forklift (disk scheduling).
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Workload file
    #[arg(long, global = true, default_value = workload::DEFAULT_PATH)]
    #[arg(value_parser = clap::value_parser!(PathBuf))]
    data:       PathBuf,

    /// Directory receiving result files
    #[arg(long, global = true, default_value = "output")]
    #[arg(value_parser = clap::value_parser!(PathBuf))]
    output:     PathBuf,

    /// Also dump every run as JSON
    #[arg(long, global = true)]
    json:       bool,

    /// Also draw PNG charts (CPU and disk runs)
    #[arg(long, global = true)]
    plot:       bool,

    #[command(subcommand)]
    command:    Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Generate a random workload and save it
    Generate(WorkloadConfig),
    /// Schedule the orders on the workers
    Cpu {
        #[arg(value_enum)]
        algorithm:  CpuKind,
        /// Round Robin time quantum
        #[arg(short, long, default_value_t = 2)]
        quantum:    usize,
    },
    /// Place the orders in the racks
    Memory {
        #[arg(value_enum)]
        fit:        Fit,
    },
    /// Move the forklift between the docks
    Disk {
        #[arg(value_enum)]
        algorithm:  DiskKind,
        /// Initial sweep direction of SCAN and C-SCAN
        #[arg(short, long, value_enum, default_value_t = Direction::Up)]
        direction:  Direction,
    },
    /// Run every algorithm of a family and tabulate the results
    Compare {
        #[arg(value_enum)]
        family:     Family,
        /// Round Robin time quantum
        #[arg(short, long, default_value_t = 2)]
        quantum:    usize,
        /// Initial sweep direction of SCAN and C-SCAN
        #[arg(short, long, value_enum, default_value_t = Direction::Up)]
        direction:  Direction,
    },
    /// Interactive menu over one loaded workload
    Menu,
    /// Delete the workload file and the output directory
    Clean,
}

#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, ValueEnum, Debug)]
enum CpuKind {
    /// First come, first served
    Fcfs,
    /// Shortest job first
    Sjf,
    /// Shortest remaining job first
    Srjf,
    /// Non-preemptive priority
    Priority,
    /// Preemptive priority
    PriorityPreemptive,
    /// Round Robin
    Rr,
}

impl CpuKind {
    fn resolve(self, quantum: usize) -> Result<CpuAlgorithm> {
        Ok(match self {
            CpuKind::Fcfs                   => { CpuAlgorithm::Fcfs },
            CpuKind::Sjf                    => { CpuAlgorithm::Sjf },
            CpuKind::Srjf                   => { CpuAlgorithm::Srjf },
            CpuKind::Priority               => { CpuAlgorithm::Priority { preemptive: false } },
            CpuKind::PriorityPreemptive     => { CpuAlgorithm::Priority { preemptive: true } },
            CpuKind::Rr                     => { CpuAlgorithm::round_robin(quantum)? },
        })
    }
}

#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, ValueEnum, Debug)]
enum DiskKind {
    /// First come, first served
    Fcfs,
    /// Shortest seek time first
    Sstf,
    /// Elevator
    Scan,
    /// Circular elevator
    CScan,
}

impl DiskKind {
    fn resolve(self, direction: Direction) -> DiskAlgorithm {
        match self {
            DiskKind::Fcfs  => { DiskAlgorithm::Fcfs },
            DiskKind::Sstf  => { DiskAlgorithm::Sstf },
            DiskKind::Scan  => { DiskAlgorithm::Scan(direction) },
            DiskKind::CScan => { DiskAlgorithm::CScan(direction) },
        }
    }
}

/// Loads the workload at `path`, generating (and saving) a default
/// one if there is nothing there yet.
fn open(path: &Path, options: Options) -> Result<Session> {
    let workload = if path.exists() {
        workload::load(path).with_context(|| format!("cannot load {}", path.display()))?
    } else {
        warn!("{} not found, generating a default workload", path.display());
        let fresh = workload::generate(&WorkloadConfig::default())?;
        workload::save(&fresh, path)?;
        fresh
    };

    Ok(Session::new(workload, options))
}

fn generate(config: &WorkloadConfig, path: &Path) -> Result<()> {
    let total = std::time::Instant::now();
    let w = workload::generate(config)?;
    workload::save(&w, path)?;
    println!("Orders:\t\t\t{}", w.tasks.len());
    println!("Racks:\t\t\t{}", w.blocks.len());
    println!("Truck requests:\t\t{}", w.requests.len());
    println!("Warehouse capacity:\t{} units", w.config.warehouse_size);
    println!("Seed:\t\t\t{}", w.config.seed.unwrap_or_default());
    println!("Saved to {} in {} μs", path.display(), total.elapsed().as_micros());

    Ok(())
}

fn clean(data: &Path, output: &Path) -> Result<()> {
    if data.exists() {
        fs::remove_file(data).with_context(|| format!("cannot remove {}", data.display()))?;
        println!("Removed {}", data.display());
    }
    if output.exists() {
        fs::remove_dir_all(output).with_context(|| format!("cannot remove {}", output.display()))?;
        println!("Removed {}", output.display());
    }

    Ok(())
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"))
        .format_timestamp(None)
        .init();
    let cli = Args::parse();
    let options = Options {
        output: cli.output.clone(),
        json:   cli.json,
        plot:   cli.plot,
    };
    let mut out = std::io::stdout().lock();

    match cli.command {
        Command::Generate(config)                           => { generate(&config, &cli.data)?; },
        Command::Clean                                      => { clean(&cli.data, &cli.output)?; },
        Command::Cpu { algorithm, quantum }                 => {
            let algorithm = algorithm.resolve(quantum)?;
            open(&cli.data, options)?.cpu(algorithm, &mut out)?;
        },
        Command::Memory { fit }                             => {
            open(&cli.data, options)?.memory(fit, &mut out)?;
        },
        Command::Disk { algorithm, direction }              => {
            open(&cli.data, options)?.disk(algorithm.resolve(direction), &mut out)?;
        },
        Command::Compare { family, quantum, direction }     => {
            let quantum = NonZeroUsize::new(quantum).ok_or(EngineError::ZeroQuantum)?;
            open(&cli.data, options)?.compare(family, quantum, direction, &mut out)?;
        },
        Command::Menu                                       => {
            let mut session = open(&cli.data, options)?;
            menu::run(&mut session, std::io::stdin().lock(), &mut out)?;
        },
    }

    Ok(())
}
