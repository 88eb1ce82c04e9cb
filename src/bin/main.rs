// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2025 Daniel Negri
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU Affero General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE. See the
// GNU Affero General Public License for more details.
//
// You should have received a copy of the GNU Affero General Public License
// along with this program. If not, see <https://www.gnu.org/licenses/>.

use clap::Parser;
use csv::Writer;
use serde::Serialize;
use std::fs::File;
use std::io::{self, BufRead, BufReader, Write};
use std::path::PathBuf;
use std::process;
use tracing::{debug, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use vaccination_booking::{BookingEngine, Instruction, InstructionError};

/// Vaccination Booking - Run booking instructions against an in-memory engine
///
/// Reads one instruction per line and prints the outcome of each to stdout.
/// State lives only for the lifetime of the process.
#[derive(Parser, Debug)]
#[command(name = "vaccination-booking")]
#[command(about = "Books vaccination appointments from text instructions", long_about = None)]
struct Args {
    /// Path to a file with one instruction per line (stdin if omitted)
    ///
    /// Example: ADD_CAPACITY C1 5 10
    #[arg(value_name = "FILE")]
    input: Option<PathBuf>,

    /// Print a prompt before reading each instruction
    #[arg(long)]
    prompt: bool,

    /// Log filter used when RUST_LOG is not set
    #[arg(long, value_name = "FILTER", default_value = "warn")]
    log_level: String,
}

fn main() {
    let args = Args::parse();

    // Logs go to stderr so stdout only carries instruction results.
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| args.log_level.as_str().into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();

    let engine = BookingEngine::new();
    let stdout = io::stdout();

    let result = match &args.input {
        Some(path) => {
            let file = match File::open(path) {
                Ok(f) => f,
                Err(e) => {
                    eprintln!("Error opening file '{}': {}", path.display(), e);
                    process::exit(1);
                }
            };
            process_instructions(&engine, BufReader::new(file), stdout.lock(), args.prompt)
        }
        None => process_instructions(&engine, io::stdin().lock(), stdout.lock(), args.prompt),
    };

    if let Err(e) = result {
        eprintln!("Error processing instructions: {}", e);
        process::exit(1);
    }
}

/// Runs every instruction from `reader` against `engine`, writing outcomes to `writer`.
///
/// Invalid lines (including bytes that are not UTF-8) and rejected operations
/// are reported and skipped; only I/O failures stop processing. Returns at end
/// of input.
///
/// # Example
///
/// ```text
/// ADD_VACCINATION_CENTER KA Bangalore C1
/// ADD_CAPACITY C1 5 10
/// BOOK_VACCINATION C1 5 U1
/// ```
fn process_instructions<R: BufRead, W: Write>(
    engine: &BookingEngine,
    mut reader: R,
    mut writer: W,
    prompt: bool,
) -> Result<(), csv::Error> {
    let mut line = Vec::new();
    let mut processed = 0usize;

    loop {
        if prompt {
            write!(writer, "Enter instruction \t")?;
            writer.flush()?;
        }

        line.clear();
        if reader.read_until(b'\n', &mut line)? == 0 {
            break;
        }
        processed += 1;

        let parsed = std::str::from_utf8(&line)
            .map_err(|_| InstructionError::NotUtf8)
            .and_then(str::parse::<Instruction>);
        match parsed {
            Ok(instruction) => {
                debug!(instruction = instruction.name(), "executing");
                execute(engine, instruction, &mut writer)?;
            }
            Err(e) => writeln!(writer, "Invalid instruction: {}", e)?,
        }
    }

    writer.flush()?;
    info!(processed, "input exhausted");
    Ok(())
}

/// Executes one instruction and writes its outcome.
fn execute<W: Write>(
    engine: &BookingEngine,
    instruction: Instruction,
    writer: &mut W,
) -> Result<(), csv::Error> {
    let action = instruction.name();

    match instruction {
        Instruction::AddUser {
            id,
            name,
            gender,
            age,
            state,
            district,
        } => match engine.register_user(id.clone(), &name, &gender, &age, &state, &district) {
            Ok(()) => writeln!(writer, "Action Success: user {} registered", id)?,
            Err(e) => report(writer, action, &e)?,
        },
        Instruction::AddVaccinationCenter { state, district, id } => {
            match engine.register_center(&state, &district, id.clone()) {
                Ok(()) => writeln!(
                    writer,
                    "Action Success: vaccination center {} registered in {}, {}",
                    id, district, state
                )?,
                Err(e) => report(writer, action, &e)?,
            }
        }
        Instruction::AddCapacity {
            center_id,
            day,
            capacity,
        } => match engine.add_capacity(&center_id, &day, &capacity) {
            Ok(remaining) => writeln!(
                writer,
                "Action Success: center {} has {} doses on day {}",
                center_id, remaining, day
            )?,
            Err(e) => report(writer, action, &e)?,
        },
        Instruction::BookVaccination {
            center_id,
            day,
            user_id,
        } => match engine.book(&center_id, &day, &user_id) {
            Ok(()) => writeln!(
                writer,
                "Action Success: booking confirmed for user {} at center {} on day {}",
                user_id, center_id, day
            )?,
            Err(e) => report(writer, action, &e)?,
        },
        Instruction::CancelBooking {
            center_id,
            day,
            user_id,
        } => match engine.cancel(&center_id, &day, &user_id) {
            Ok(()) => writeln!(
                writer,
                "Action Success: booking cancelled for user {} at center {} on day {}",
                user_id, center_id, day
            )?,
            Err(e) => report(writer, action, &e)?,
        },
        Instruction::ListVaccinationCenters { district } => {
            let centers = engine.centers_in_district(&district);
            if centers.is_empty() {
                writeln!(writer, "No vaccination centers found for district {}", district)?;
            } else {
                writeln!(
                    writer,
                    "Action Success: {} vaccination centers in {}",
                    centers.len(),
                    district
                )?;
                write_table(&mut *writer, &centers)?;
            }
        }
        Instruction::ListAllBookings { day, center_id } => {
            match engine.bookings_on_day(&center_id, &day) {
                Ok(bookings) => {
                    writeln!(
                        writer,
                        "Action Success: {} bookings at center {} on day {}",
                        bookings.len(),
                        center_id,
                        day
                    )?;
                    write_table(&mut *writer, &bookings)?;
                }
                Err(e) => report(writer, action, &e)?,
            }
        }
    }

    Ok(())
}

fn report<W: Write>(writer: &mut W, action: &str, error: &dyn std::error::Error) -> io::Result<()> {
    writeln!(writer, "Error in {}: {}", action, error)
}

/// Writes `records` as CSV with a header row.
///
/// # Example
///
/// ```csv
/// center_id,user_id,day
/// C1,U1,5
/// ```
fn write_table<W: Write, T: Serialize>(writer: W, records: &[T]) -> Result<(), csv::Error> {
    let mut wtr = Writer::from_writer(writer);

    for record in records {
        wtr.serialize(record)?;
    }

    wtr.flush()?;
    Ok(())
}
