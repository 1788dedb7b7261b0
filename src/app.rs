use std::io::{self, BufRead, Write};

use crate::config::ShellConfig;
use crate::data::model::Student;
use crate::data::query::{self, QueryError};
use crate::data::stats;
use crate::state::Session;
use crate::ui::table;

// ---------------------------------------------------------------------------
// Commands
// ---------------------------------------------------------------------------

/// One line of user input, parsed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    List,
    Search(String),
    Filter(String),
    Stats,
    /// Run the input-validation probes.
    Test,
    Help,
    Quit,
    Empty,
    Unknown(String),
}

impl Command {
    /// Parse a command line. The command word is case-insensitive; the rest
    /// of the line is its argument.
    pub fn parse(line: &str) -> Self {
        let line = line.trim();
        let (word, rest) = match line.split_once(char::is_whitespace) {
            Some((word, rest)) => (word, rest.trim()),
            None => (line, ""),
        };

        match word.to_lowercase().as_str() {
            "" => Command::Empty,
            "list" => Command::List,
            "search" => Command::Search(rest.to_string()),
            "filter" => Command::Filter(rest.to_string()),
            "stats" => Command::Stats,
            "test" => Command::Test,
            "help" => Command::Help,
            "quit" | "exit" => Command::Quit,
            other => Command::Unknown(other.to_string()),
        }
    }
}

/// What executing a command led to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// Output was produced, possibly an empty-result message.
    Shown,
    /// The input was invalid; a usage message was printed.
    Rejected,
    Quit,
}

const HELP: &str = "\
Available commands:
  list                 show every student
  search <name>        find students whose name contains <name>
  filter <average>     show students with an average above <average>
  stats                overall statistics
  test                 run the input-validation checks
  help                 show this help
  quit | exit          leave the program

Examples:
  search EMILY
  filter 15
";

// ---------------------------------------------------------------------------
// Shell
// ---------------------------------------------------------------------------

pub struct RosterApp {
    pub session: Session,
    shell: ShellConfig,
}

impl RosterApp {
    pub fn new(session: Session, shell: ShellConfig) -> Self {
        Self { session, shell }
    }

    /// Read commands from `input` until `quit`/`exit` or end of input.
    pub fn run<R: BufRead, W: Write>(&self, mut input: R, out: &mut W) -> io::Result<()> {
        if self.shell.banner {
            writeln!(out, "STUDENT ROSTER")?;
            writeln!(out, "{}", "=".repeat(50))?;
        }
        self.write_load_status(out)?;
        if self.shell.banner {
            writeln!(out)?;
            write!(out, "{HELP}")?;
        }

        let mut line = String::new();
        loop {
            write!(out, "{}", self.shell.prompt)?;
            out.flush()?;

            line.clear();
            if input.read_line(&mut line)? == 0 {
                writeln!(out)?;
                break;
            }

            if self.execute(&Command::parse(&line), out)? == Outcome::Quit {
                break;
            }
        }
        Ok(())
    }

    fn write_load_status<W: Write>(&self, out: &mut W) -> io::Result<()> {
        match &self.session.status_message {
            Some(message) => writeln!(out, "{message}")?,
            None => writeln!(out, "{} students loaded.", self.session.roster().len())?,
        }
        if !self.session.rejected.is_empty() {
            writeln!(
                out,
                "{} invalid entries skipped (run with RUST_LOG=warn for details).",
                self.session.rejected.len()
            )?;
        }
        Ok(())
    }

    /// Execute a single command, writing its output to `out`.
    pub fn execute<W: Write>(&self, command: &Command, out: &mut W) -> io::Result<Outcome> {
        log::debug!("Executing {command:?}");
        match command {
            Command::List => self.list(out),
            Command::Search(term) => self.search(term, out),
            Command::Filter(threshold) => self.filter(threshold, out),
            Command::Stats => self.stats(out),
            Command::Test => self.probe(out),
            Command::Help => {
                write!(out, "{HELP}")?;
                Ok(Outcome::Shown)
            }
            Command::Quit => {
                writeln!(out, "Goodbye!")?;
                Ok(Outcome::Quit)
            }
            Command::Empty => Ok(Outcome::Shown),
            Command::Unknown(word) => {
                writeln!(out, "Unknown command: \"{word}\"")?;
                writeln!(out, "Type \"help\" to see the available commands.")?;
                Ok(Outcome::Rejected)
            }
        }
    }

    fn list<W: Write>(&self, out: &mut W) -> io::Result<Outcome> {
        let students: Vec<&Student> = self.session.roster().iter().collect();
        writeln!(out, "\nAll students:")?;
        if students.is_empty() {
            writeln!(out, "No students found.")?;
        } else {
            self.write_table(&students, out)?;
        }
        Ok(Outcome::Shown)
    }

    fn search<W: Write>(&self, term: &str, out: &mut W) -> io::Result<Outcome> {
        let found = match query::search_by_name(self.session.roster(), term) {
            Ok(found) => found,
            Err(e) => return self.reject(&e, out),
        };

        writeln!(out, "\nSearch results for \"{}\":", term.trim())?;
        if found.is_empty() {
            writeln!(out, "No student found with this name.")?;
        } else {
            self.write_table(&found, out)?;
        }
        Ok(Outcome::Shown)
    }

    fn filter<W: Write>(&self, input: &str, out: &mut W) -> io::Result<Outcome> {
        let scale = &self.session.scale;
        let found = match query::parse_threshold(input, scale).and_then(|t| {
            query::filter_by_min_average(self.session.roster(), t, scale).map(|f| (t, f))
        }) {
            Ok(found) => found,
            Err(e) => return self.reject(&e, out),
        };

        let (threshold, students) = found;
        writeln!(out, "\nStudents with an average above {threshold}:")?;
        if students.is_empty() {
            writeln!(out, "No student has an average above {threshold}.")?;
        } else {
            self.write_table(&students, out)?;
        }
        Ok(Outcome::Shown)
    }

    fn stats<W: Write>(&self, out: &mut W) -> io::Result<Outcome> {
        writeln!(out, "\nStatistics:")?;
        match stats::compute(self.session.roster()) {
            Some(stats) => {
                write!(out, "{}", table::render_statistics(&stats, &self.session.scale))?
            }
            None => writeln!(out, "No data available for statistics.")?,
        }
        Ok(Outcome::Shown)
    }

    /// Exercise the validation paths against the loaded roster.
    fn probe<W: Write>(&self, out: &mut W) -> io::Result<Outcome> {
        let roster = self.session.roster();
        let scale = &self.session.scale;

        let describe = |result: Result<Vec<&Student>, QueryError>| match result {
            Ok(found) => format!("{} students found", found.len()),
            Err(e) => format!("rejected ({e})"),
        };

        writeln!(out, "\nInput validation checks:")?;
        writeln!(
            out,
            "Test 1: search with an empty name -> {}",
            describe(query::search_by_name(roster, ""))
        )?;
        let above = scale.max + 5.0;
        writeln!(
            out,
            "Test 2: filter above the scale ({above}) -> {}",
            describe(query::filter_by_min_average(roster, above, scale))
        )?;
        let below = scale.min - 5.0;
        writeln!(
            out,
            "Test 3: filter below the scale ({below}) -> {}",
            describe(query::filter_by_min_average(roster, below, scale))
        )?;
        writeln!(
            out,
            "Test 4: search for \"XYZ123\" -> {}",
            describe(query::search_by_name(roster, "XYZ123"))
        )?;
        Ok(Outcome::Shown)
    }

    fn reject<W: Write>(&self, error: &QueryError, out: &mut W) -> io::Result<Outcome> {
        log::debug!("Rejected input: {error}");
        let scale = &self.session.scale;
        match error {
            QueryError::EmptySearchTerm => {
                writeln!(out, "Usage: search <name>")?;
                writeln!(out, "Example: search EMILY")?;
            }
            QueryError::MissingThreshold => {
                writeln!(out, "Usage: filter <average>")?;
                writeln!(out, "Example: filter 15")?;
            }
            QueryError::InvalidThreshold(_) | QueryError::ThresholdOutOfRange { .. } => {
                writeln!(out, "Invalid input: {error}")?;
                writeln!(
                    out,
                    "Please give an average between {} and {}.",
                    scale.min, scale.max
                )?;
                writeln!(out, "Example: filter 15")?;
            }
        }
        Ok(Outcome::Rejected)
    }

    fn write_table<W: Write>(&self, students: &[&Student], out: &mut W) -> io::Result<()> {
        writeln!(out, "{}", table::render_students(students, &self.session.scale))
    }
}
