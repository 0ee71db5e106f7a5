//! The interactive front end: a main menu leading to one sub-menu
//! per family. End of input anywhere leaves the menu cleanly.

use std::io::Lines;

use depot::*;
use crate::{compare::Family, session::Session, table, utils::*};

/// Prints `text` and reads one trimmed line. `None` means end of input.
fn prompt<R: BufRead, W: Write>(lines: &mut Lines<R>, out: &mut W, text: &str) -> Result<Option<String>> {
    write!(out, "{text}")?;
    out.flush()?;
    match lines.next() {
        Some(line)  => { Ok(Some(line?.trim().to_string())) },
        None        => { Ok(None) },
    }
}

fn invalid<W: Write>(out: &mut W) -> Result<()> {
    writeln!(out, "Invalid choice")?;

    Ok(())
}

pub fn run<R: BufRead, W: Write>(session: &mut Session, input: R, out: &mut W) -> Result<()> {
    let mut lines = input.lines();
    loop {
        write!(out, "{}", table::banner("WAREHOUSE MANAGEMENT SYSTEM MAIN MENU"))?;
        writeln!(out, "1. Worker Task Management (CPU Scheduling)")?;
        writeln!(out, "2. Storage Rack Allocation (Memory Management)")?;
        writeln!(out, "3. Truck Movement Management (Disk Scheduling)")?;
        writeln!(out, "4. Compare Algorithms")?;
        writeln!(out, "5. Exit")?;
        let Some(choice) = prompt(&mut lines, out, "Enter your choice (1-5): ")? else { break };
        match choice.as_str() {
            "1" => { cpu(session, &mut lines, out)?; },
            "2" => { memory(session, &mut lines, out)?; },
            "3" => { disk(session, &mut lines, out)?; },
            "4" => { compare(session, &mut lines, out)?; },
            "5" => { break; },
            _   => { invalid(out)?; },
        }
    }
    writeln!(out, "\nLeaving the warehouse.")?;

    Ok(())
}

fn cpu<R: BufRead, W: Write>(session: &mut Session, lines: &mut Lines<R>, out: &mut W) -> Result<()> {
    write!(out, "{}", table::banner("WORKER TASK MANAGEMENT"))?;
    writeln!(out, "A. First Come First Serve (FCFS)")?;
    writeln!(out, "B. Shortest Job First (SJF)")?;
    writeln!(out, "C. Shortest Remaining Job First (SRJF)")?;
    writeln!(out, "D. Priority Scheduling")?;
    writeln!(out, "E. Round Robin (RR)")?;
    writeln!(out, "F. Back to Main Menu")?;
    let Some(choice) = prompt(lines, out, "Enter choice (A-F): ")? else { return Ok(()) };

    let algorithm = match choice.to_ascii_uppercase().as_str() {
        "A" => { CpuAlgorithm::Fcfs },
        "B" => { CpuAlgorithm::Sjf },
        "C" => { CpuAlgorithm::Srjf },
        "D" => {
            writeln!(out, "1. Non-Preemptive Priority Scheduling")?;
            writeln!(out, "2. Preemptive Priority Scheduling")?;
            let preemptive = loop {
                match prompt(lines, out, "Enter your choice (1-2): ")?.as_deref() {
                    Some("1")   => { break false; },
                    Some("2")   => { break true; },
                    Some(_)     => { invalid(out)?; },
                    None        => { return Ok(()); },
                }
            };
            CpuAlgorithm::Priority { preemptive }
        },
        "E" => {
            let Some(quantum) = ask_quantum(lines, out)? else { return Ok(()) };
            CpuAlgorithm::RoundRobin { quantum }
        },
        "F" => { return Ok(()); },
        _   => { return invalid(out); },
    };
    session.cpu(algorithm, out)?;

    Ok(())
}

fn ask_quantum<R: BufRead, W: Write>(lines: &mut Lines<R>, out: &mut W) -> Result<Option<NonZeroUsize>> {
    loop {
        let Some(raw) = prompt(lines, out, "Enter time quantum: ")? else { return Ok(None) };
        let parsed = raw.parse::<usize>()
            .map_err(|e| e.to_string())
            .and_then(|q| NonZeroUsize::new(q).ok_or_else(|| EngineError::ZeroQuantum.to_string()));
        match parsed {
            Ok(quantum) => { return Ok(Some(quantum)); },
            Err(e)      => { writeln!(out, "Invalid quantum: {e}")?; },
        }
    }
}

fn memory<R: BufRead, W: Write>(session: &mut Session, lines: &mut Lines<R>, out: &mut W) -> Result<()> {
    write!(out, "{}", table::banner("STORAGE RACK ALLOCATION"))?;
    writeln!(out, "A. First Fit")?;
    writeln!(out, "B. Best Fit")?;
    writeln!(out, "C. Next Fit")?;
    writeln!(out, "D. Worst Fit")?;
    writeln!(out, "E. Back to Main Menu")?;
    let Some(choice) = prompt(lines, out, "Enter choice (A-E): ")? else { return Ok(()) };

    let fit = match choice.to_ascii_uppercase().as_str() {
        "A" => { Fit::First },
        "B" => { Fit::Best },
        "C" => { Fit::Next },
        "D" => { Fit::Worst },
        "E" => { return Ok(()); },
        _   => { return invalid(out); },
    };
    session.memory(fit, out)?;

    Ok(())
}

fn ask_direction<R: BufRead, W: Write>(lines: &mut Lines<R>, out: &mut W) -> Result<Option<Direction>> {
    loop {
        match prompt(lines, out, "Sweep direction (up/down) [up]: ")?.as_deref() {
            Some("") | Some("up") | Some("u")   => { return Ok(Some(Direction::Up)); },
            Some("down") | Some("d")            => { return Ok(Some(Direction::Down)); },
            Some(_)                             => { invalid(out)?; },
            None                                => { return Ok(None); },
        }
    }
}

fn disk<R: BufRead, W: Write>(session: &mut Session, lines: &mut Lines<R>, out: &mut W) -> Result<()> {
    write!(out, "{}", table::banner("TRUCK MOVEMENT MANAGEMENT"))?;
    writeln!(out, "Forklift currently at dock {}", session.head())?;
    writeln!(out, "A. First Come First Serve (FCFS)")?;
    writeln!(out, "B. Shortest Seek Time First (SSTF)")?;
    writeln!(out, "C. SCAN (Elevator Algorithm)")?;
    writeln!(out, "D. C-SCAN (Circular SCAN)")?;
    writeln!(out, "E. Back to Main Menu")?;
    let Some(choice) = prompt(lines, out, "Enter choice (A-E): ")? else { return Ok(()) };

    let algorithm = match choice.to_ascii_uppercase().as_str() {
        "A" => { DiskAlgorithm::Fcfs },
        "B" => { DiskAlgorithm::Sstf },
        "C" => {
            let Some(dir) = ask_direction(lines, out)? else { return Ok(()) };
            DiskAlgorithm::Scan(dir)
        },
        "D" => {
            let Some(dir) = ask_direction(lines, out)? else { return Ok(()) };
            DiskAlgorithm::CScan(dir)
        },
        "E" => { return Ok(()); },
        _   => { return invalid(out); },
    };
    session.disk(algorithm, out)?;

    Ok(())
}

fn compare<R: BufRead, W: Write>(session: &mut Session, lines: &mut Lines<R>, out: &mut W) -> Result<()> {
    writeln!(out, "1. CPU Scheduling")?;
    writeln!(out, "2. Storage Allocation")?;
    writeln!(out, "3. Disk Scheduling")?;
    let Some(choice) = prompt(lines, out, "Enter your choice (1-3): ")? else { return Ok(()) };

    let family = match choice.as_str() {
        "1" => { Family::Cpu },
        "2" => { Family::Memory },
        "3" => { Family::Disk },
        _   => { return invalid(out); },
    };
    let mut quantum = NonZeroUsize::MIN;
    let mut direction = Direction::Up;
    match family {
        Family::Cpu     => {
            let Some(q) = ask_quantum(lines, out)? else { return Ok(()) };
            quantum = q;
        },
        Family::Disk    => {
            let Some(d) = ask_direction(lines, out)? else { return Ok(()) };
            direction = d;
        },
        Family::Memory  => {},
    }

    session.compare(family, quantum, direction, out)
}
