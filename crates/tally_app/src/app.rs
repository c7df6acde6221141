use std::io::Write;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{bail, Context, Result};
use chrono::{Local, NaiveDate};
use clap::{Args, Parser, Subcommand, ValueEnum};
use rand::Rng;
use tally_core::{
    agenda::{AgendaEntry, AgendaGroups},
    navigation::DateCursor,
    picker::TitleSuggester,
    recurrence::{BiweeklyWeeks, MonthEdge, Recurrence, WeekOrdinal},
    streak::{StreakOutcome, StreakUpdate},
    task::{DueTime, NewTask},
    BiweeklyMode, Tracker,
};
use tracing::{info, warn};

use crate::store::JsonFileRepository;

#[derive(Clone, Debug)]
pub struct AppConfig {
    pub(crate) store_path: PathBuf,
    pub(crate) today: Option<NaiveDate>,
    pub(crate) biweekly_mode: BiweeklyMode,
    pub(crate) agenda_span_days: usize,
}

impl AppConfig {
    pub fn from_env() -> Result<Self> {
        let mut config = Self::default();
        if let Ok(path) = std::env::var("TALLY_STORE") {
            if !path.trim().is_empty() {
                config.store_path = PathBuf::from(path);
            }
        }
        if let Ok(today) = std::env::var("TALLY_TODAY") {
            match NaiveDate::parse_from_str(today.trim(), "%Y-%m-%d") {
                Ok(date) => config.today = Some(date),
                Err(err) => warn!(value = %today, %err, "ignoring TALLY_TODAY"),
            }
        }
        if let Ok(mode) = std::env::var("TALLY_BIWEEKLY_MODE") {
            match mode.parse::<BiweeklyMode>() {
                Ok(mode) => config.biweekly_mode = mode,
                Err(err) => warn!(%err, "ignoring TALLY_BIWEEKLY_MODE"),
            }
        }
        if let Ok(span) = std::env::var("TALLY_AGENDA_SPAN_DAYS") {
            match parse_span(&span) {
                Some(days) => config.agenda_span_days = days,
                None => warn!(value = %span, "ignoring TALLY_AGENDA_SPAN_DAYS"),
            }
        }
        Ok(config)
    }

    pub fn with_store_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.store_path = path.into();
        self
    }

    pub fn with_today(mut self, today: NaiveDate) -> Self {
        self.today = Some(today);
        self
    }

    pub fn with_biweekly_mode(mut self, mode: BiweeklyMode) -> Self {
        self.biweekly_mode = mode;
        self
    }

    pub fn today(&self) -> NaiveDate {
        self.today.unwrap_or_else(|| Local::now().date_naive())
    }

    pub(crate) fn apply_cli(&mut self, cli: &Cli) {
        if let Some(path) = &cli.store {
            self.store_path = path.clone();
        }
        if let Some(today) = cli.today {
            self.today = Some(today);
        }
        if let Some(mode) = cli.biweekly {
            self.biweekly_mode = mode;
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            store_path: PathBuf::from("tally.json"),
            today: None,
            biweekly_mode: BiweeklyMode::default(),
            agenda_span_days: 7,
        }
    }
}

/// Positive day count; zero and non-numbers are rejected.
fn parse_span(raw: &str) -> Option<usize> {
    raw.trim().parse::<usize>().ok().filter(|days| *days > 0)
}

/// Recurring task tracker.
#[derive(Debug, Parser)]
#[command(name = "tally", version)]
pub struct Cli {
    /// JSON store file (overrides TALLY_STORE)
    #[arg(long, global = true)]
    store: Option<PathBuf>,
    /// Treat this date as today (YYYY-MM-DD)
    #[arg(long, global = true)]
    today: Option<NaiveDate>,
    /// Biweekly definition: week-of-month or anchor
    #[arg(long, global = true)]
    biweekly: Option<BiweeklyMode>,
    #[command(subcommand)]
    command: Option<Command>,
}

impl Cli {
    pub fn command(&self) -> Command {
        self.command
            .clone()
            .unwrap_or(Command::Today {
                date: None,
                prev: false,
                next: false,
            })
    }
}

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Show the agenda, streak and quote for a day (default)
    Today {
        #[arg(long)]
        date: Option<NaiveDate>,
        /// Step back one day (from today or tomorrow only)
        #[arg(long, conflicts_with = "next")]
        prev: bool,
        /// Step forward one day (from yesterday or today only)
        #[arg(long)]
        next: bool,
    },
    /// Show the agenda for the next few days
    Week {
        #[arg(long)]
        days: Option<usize>,
    },
    /// Create a recurring task
    Add(AddArgs),
    /// Check or uncheck a task for a day
    Toggle {
        task_id: String,
        #[arg(long)]
        date: Option<NaiveDate>,
    },
    /// Check every task due on a day
    CompleteAll {
        #[arg(long)]
        date: Option<NaiveDate>,
    },
    /// Suggest task titles
    Suggest {
        #[arg(default_value_t = 3)]
        count: usize,
    },
    /// List every task with its schedule
    Tasks,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum RepeatArg {
    Daily,
    Weekly,
    Biweekly,
    MonthlyDay,
    MonthlyWeekday,
    FirstDay,
    LastDay,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum WeeksArg {
    FirstThird,
    SecondFourth,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OrdinalArg {
    First,
    Second,
    Third,
    Fourth,
    Last,
}

#[derive(Debug, Clone, Args)]
pub struct AddArgs {
    /// Task title; omit to get a suggestion
    pub title: Option<String>,
    #[arg(long, value_enum, default_value_t = RepeatArg::Daily)]
    pub repeat: RepeatArg,
    /// Day of week, 0 = Sunday .. 6 = Saturday
    #[arg(long)]
    pub weekday: Option<u8>,
    #[arg(long, value_enum)]
    pub weeks: Option<WeeksArg>,
    /// Day of month, 1-31
    #[arg(long)]
    pub day: Option<u8>,
    #[arg(long, value_enum)]
    pub ordinal: Option<OrdinalArg>,
    /// HH:MM; defaults to all day
    #[arg(long)]
    pub at: Option<String>,
}

impl AddArgs {
    pub fn recurrence(&self) -> Result<Recurrence> {
        let weekday = || {
            self.weekday
                .context("--weekday is required for this schedule")
        };
        let rule = match self.repeat {
            RepeatArg::Daily => Recurrence::daily(),
            RepeatArg::Weekly => Recurrence::weekly(weekday()?)?,
            RepeatArg::Biweekly => {
                let weeks = match self.weeks.context("--weeks is required for biweekly")? {
                    WeeksArg::FirstThird => BiweeklyWeeks::FirstThird,
                    WeeksArg::SecondFourth => BiweeklyWeeks::SecondFourth,
                };
                Recurrence::biweekly(weekday()?, weeks)?
            }
            RepeatArg::MonthlyDay => {
                Recurrence::monthly_on_day(self.day.context("--day is required for monthly-day")?)?
            }
            RepeatArg::MonthlyWeekday => {
                let week = match self
                    .ordinal
                    .context("--ordinal is required for monthly-weekday")?
                {
                    OrdinalArg::First => WeekOrdinal::First,
                    OrdinalArg::Second => WeekOrdinal::Second,
                    OrdinalArg::Third => WeekOrdinal::Third,
                    OrdinalArg::Fourth => WeekOrdinal::Fourth,
                    OrdinalArg::Last => WeekOrdinal::Last,
                };
                Recurrence::monthly_on_weekday(week, weekday()?)?
            }
            RepeatArg::FirstDay => Recurrence::monthly_edge(MonthEdge::First),
            RepeatArg::LastDay => Recurrence::monthly_edge(MonthEdge::Last),
        };
        Ok(rule)
    }

    pub fn due_time(&self) -> Result<DueTime> {
        match &self.at {
            Some(raw) => Ok(raw.parse::<DueTime>()?),
            None => Ok(DueTime::AllDay),
        }
    }
}

/// One run of the tracker against a store: loads data, evaluates the streak
/// and executes commands.
pub struct Session {
    config: AppConfig,
    store: Arc<JsonFileRepository>,
    tracker: Tracker,
    suggester: TitleSuggester,
    streak: StreakUpdate,
}

impl Session {
    pub fn open(config: AppConfig) -> Result<Self> {
        let store = Arc::new(JsonFileRepository::open(&config.store_path)?);
        let tracker = Tracker::builder()
            .repository(Box::new(Arc::clone(&store)))
            .biweekly_mode(config.biweekly_mode)
            .build()
            .context("failed to initialize tracker")?;
        let streak = tracker.refresh_streak(config.today())?;
        info!(
            store = %store.path().display(),
            today = %config.today(),
            "session opened"
        );
        Ok(Self {
            config,
            store,
            tracker,
            suggester: TitleSuggester::default(),
            streak,
        })
    }

    pub fn tracker(&self) -> &Tracker {
        &self.tracker
    }

    pub fn execute<W: Write, R: Rng>(
        &mut self,
        command: Command,
        out: &mut W,
        rng: &mut R,
    ) -> Result<()> {
        match command {
            Command::Today { date, prev, next } => {
                let mut cursor = self.cursor_for(date);
                let moved = match (prev, next) {
                    (true, _) => cursor.retreat(),
                    (_, true) => cursor.advance(),
                    _ => true,
                };
                if !moved {
                    warn!(viewed = %cursor.viewed(), "no further step in that direction");
                }
                self.show_day(&cursor, out, rng)
            }
            Command::Week { days } => self.show_week(days, out),
            Command::Add(args) => self.add_task(args, out, rng),
            Command::Toggle { task_id, date } => {
                let date = self.cursor_for(date).viewed();
                let done = self.tracker.toggle_completion(&task_id, date)?;
                writeln!(
                    out,
                    "{} {} on {}",
                    if done { "Checked" } else { "Unchecked" },
                    task_id,
                    date
                )?;
                Ok(())
            }
            Command::CompleteAll { date } => {
                let date = self.cursor_for(date).viewed();
                let count = self.tracker.complete_all(date)?;
                writeln!(out, "Completed {} task{} on {}", count, plural(count), date)?;
                Ok(())
            }
            Command::Suggest { count } => {
                for _ in 0..count {
                    if let Some(title) = self.suggester.suggest(rng) {
                        writeln!(out, "{}", title)?;
                    }
                }
                Ok(())
            }
            Command::Tasks => {
                for task in self.tracker.tasks() {
                    let time = task.due_time.unwrap_or(DueTime::AllDay);
                    writeln!(
                        out,
                        "{}  {} · {} · {}",
                        task.id, task.title, task.recurrence, time
                    )?;
                }
                Ok(())
            }
        }
    }

    fn cursor_for(&self, date: Option<NaiveDate>) -> DateCursor {
        let mut cursor = DateCursor::new(self.config.today());
        if let Some(date) = date {
            let selected = cursor.go_to(date);
            if selected != date {
                warn!(requested = %date, %selected, "dates before yesterday are not viewable");
            }
        }
        cursor
    }

    fn show_day<W: Write, R: Rng>(
        &mut self,
        cursor: &DateCursor,
        out: &mut W,
        rng: &mut R,
    ) -> Result<()> {
        writeln!(out, "{}", format_day_heading(cursor))?;
        writeln!(out, "{}", format_streak(&self.streak))?;

        let mut rotation = self.store.quote_rotation();
        if let Some(quote) = rotation.quote_for(cursor.today(), rng) {
            writeln!(out, "\"{}\" ({})", quote.text, quote.author)?;
        }
        self.store.save_quote_rotation(rotation)?;

        writeln!(out)?;
        render_groups(out, &self.tracker.agenda_groups(cursor.viewed()))?;
        Ok(())
    }

    fn show_week<W: Write>(&self, days: Option<usize>, out: &mut W) -> Result<()> {
        let span = days.filter(|d| *d > 0).unwrap_or(self.config.agenda_span_days);
        for day in self.tracker.agenda_range(self.config.today(), span) {
            let mut cursor = DateCursor::new(self.config.today());
            cursor.go_to(day.date);
            writeln!(out, "{}", format_day_heading(&cursor))?;
            if day.entries.is_empty() {
                writeln!(out, "  (nothing due)")?;
            }
            for entry in &day.entries {
                writeln!(out, "{}", format_entry(entry))?;
            }
        }
        Ok(())
    }

    fn add_task<W: Write, R: Rng>(
        &mut self,
        args: AddArgs,
        out: &mut W,
        rng: &mut R,
    ) -> Result<()> {
        let Some(title) = args.title.clone() else {
            let hint = self.suggester.suggest(rng).unwrap_or("Walk the dog");
            bail!("a title is required, e.g. \"{hint}\"");
        };
        let draft = NewTask::new(title, args.recurrence()?).with_due_time(args.due_time()?);
        let task = self.tracker.add_task(draft)?;
        writeln!(out, "Added {} ({}) as {}", task.title, task.recurrence, task.id)?;
        Ok(())
    }
}

pub fn run(config: AppConfig, command: Command) -> Result<()> {
    let mut session = Session::open(config)?;
    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    session.execute(command, &mut out, &mut rand::thread_rng())
}

pub fn run_cli(cli: Cli) -> Result<()> {
    let mut config = AppConfig::from_env()?;
    config.apply_cli(&cli);
    run(config, cli.command())
}

fn format_day_heading(cursor: &DateCursor) -> String {
    format!(
        "{} · {}",
        cursor.relative_label(),
        cursor.viewed().format("%A, %B %d, %Y")
    )
}

fn format_streak(update: &StreakUpdate) -> String {
    let days = update.state.streak;
    let note = match update.outcome {
        StreakOutcome::Started => " (tracking starts today)",
        StreakOutcome::Reset => " (yesterday was left unfinished)",
        StreakOutcome::Lapsed => " (missed a day)",
        StreakOutcome::Extended | StreakOutcome::AlreadyChecked => "",
    };
    format!("Streak: {} day{}{}", days, plural(days as usize), note)
}

fn format_entry(entry: &AgendaEntry) -> String {
    let mark = if entry.is_complete { "[x]" } else { "[ ]" };
    match entry.task.due_time {
        Some(DueTime::At(time)) => format!(
            "  {} {} @ {}  ({})",
            mark,
            entry.task.title,
            time.format("%H:%M"),
            entry.task.id
        ),
        _ => format!("  {} {}  ({})", mark, entry.task.title, entry.task.id),
    }
}

fn render_groups<W: Write>(out: &mut W, groups: &AgendaGroups) -> Result<()> {
    if groups.is_empty() {
        writeln!(out, "All clear! Add a new task to get started.")?;
        return Ok(());
    }
    if !groups.daily.is_empty() {
        writeln!(out, "Daily habits")?;
        for entry in &groups.daily {
            writeln!(out, "{}", format_entry(entry))?;
        }
    }
    if !groups.scheduled.is_empty() {
        writeln!(out, "Scheduled")?;
        for entry in &groups.scheduled {
            writeln!(out, "{}", format_entry(entry))?;
        }
    }
    Ok(())
}

fn plural(count: usize) -> &'static str {
    if count == 1 {
        ""
    } else {
        "s"
    }
}
