use std::io::{self, Write};

use chrono::NaiveDate;
use polars::prelude::{AnyValue, DataFrame};
use sprint_planner::persistence::{
    export_timeline_to_csv, load_plan_from_json, load_stories_from_csv, save_plan_to_json,
    save_stories_to_csv, validate_stories, PlanSnapshot,
};
use sprint_planner::report;
use sprint_planner::{plan_timeline, EstimationMode, PlanSettings, UnresolvedReason, UserStory};

fn parse_dep_list(s: &str) -> Vec<String> {
    s.split(',')
        .map(|p| p.trim())
        .filter(|p| !p.is_empty())
        .map(|p| p.to_string())
        .collect()
}

fn render_df_as_text_table(df: &DataFrame) -> String {
    let columns = df.get_columns();
    let col_names: Vec<String> = columns.iter().map(|c| c.name().to_string()).collect();

    let cell = |av: &AnyValue| -> String {
        match av {
            AnyValue::Null => String::new(),
            AnyValue::Int32(v) => v.to_string(),
            AnyValue::Int64(v) => v.to_string(),
            AnyValue::UInt32(v) => v.to_string(),
            AnyValue::String(s) => s.to_string(),
            AnyValue::Date(days) => report::date_from_i32(*days).format("%Y-%m-%d").to_string(),
            other => other.to_string(),
        }
    };

    // Compute column widths
    let mut widths: Vec<usize> = col_names.iter().map(|n| n.len()).collect();
    for (ci, col) in columns.iter().enumerate() {
        for row_idx in 0..df.height() {
            if let Ok(ref av) = col.get(row_idx) {
                let s = cell(av);
                if s.len() > widths[ci] {
                    widths[ci] = s.len();
                }
            }
        }
    }

    // Build horizontal separator
    let mut sep = String::new();
    sep.push('+');
    for w in &widths {
        sep.push_str(&"-".repeat(*w + 2));
        sep.push('+');
    }

    let mut out = String::new();
    out.push_str(&sep);
    out.push('\n');

    // Header
    out.push('|');
    for (i, name) in col_names.iter().enumerate() {
        out.push(' ');
        out.push_str(name);
        let pad = widths[i] - name.len();
        if pad > 0 {
            out.push_str(&" ".repeat(pad));
        }
        out.push(' ');
        out.push('|');
    }
    out.push('\n');
    out.push_str(&sep);
    out.push('\n');

    // Rows
    for row_idx in 0..df.height() {
        out.push('|');
        for (ci, col) in columns.iter().enumerate() {
            let s = col.get(row_idx).map(|av| cell(&av)).unwrap_or_default();
            out.push(' ');
            out.push_str(&s);
            let pad = widths[ci].saturating_sub(s.len());
            if pad > 0 {
                out.push_str(&" ".repeat(pad));
            }
            out.push(' ');
            out.push('|');
        }
        out.push('\n');
    }

    out.push_str(&sep);
    out.push('\n');
    out
}

fn print_help() {
    println!(
        "Commands:\n  help                               Show this help\n  show                               List backlog stories\n  add <id> <epic> <min> <max> <title...>\n                                     Add or replace a story\n  deps <id> <csv>                    Set a story's dependencies (e.g. a,b)\n  delete <id>                        Remove a story\n  start <YYYY-MM-DD>                 Set project start date\n  mode <optimistic|pessimistic>      Set estimation mode\n  team <n>                           Set team size\n  plan                               Compute and print the timeline\n  end                                Print the project end date\n  load json|csv <path>               Load a plan (json) or backlog (csv)\n  save json|csv <path>               Save the plan (json) or backlog (csv)\n  export <path>                      Export last computed timeline as CSV\n  quit|exit                          Exit"
    );
}

fn print_backlog(stories: &[UserStory]) {
    if stories.is_empty() {
        println!("Backlog is empty.");
        return;
    }
    for story in stories {
        let deps = if story.dependencies.is_empty() {
            "-".to_string()
        } else {
            story.dependencies.join(",")
        };
        println!(
            "{}  [{}] {} ({}-{} SP, deps: {})",
            story.id, story.epic, story.title, story.min_points, story.max_points, deps
        );
    }
}

struct Session {
    stories: Vec<UserStory>,
    project_start: NaiveDate,
    mode: EstimationMode,
    team_size: usize,
    settings: PlanSettings,
    last_timeline: Vec<sprint_planner::ScheduledStory>,
}

impl Session {
    fn new() -> Self {
        let today = chrono::Local::now().date_naive();
        Self {
            stories: Vec::new(),
            project_start: today,
            mode: EstimationMode::Optimistic,
            team_size: 3,
            settings: PlanSettings::default(),
            last_timeline: Vec::new(),
        }
    }

    fn snapshot(&self) -> PlanSnapshot {
        PlanSnapshot {
            project_start: self.project_start,
            mode: self.mode,
            team_size: self.team_size,
            settings: self.settings.clone(),
            stories: self.stories.clone(),
        }
    }

    fn plan(&mut self) {
        let timeline = plan_timeline(
            &self.stories,
            self.project_start,
            self.mode,
            self.team_size,
        );
        match report::timeline_dataframe(&timeline.scheduled) {
            Ok(df) => print!("{}", render_df_as_text_table(&df)),
            Err(err) => println!("Failed to build timeline table: {err}"),
        }
        for unresolved in &timeline.unresolved {
            let why = match &unresolved.reason {
                UnresolvedReason::MissingDependency(dep) => {
                    format!("depends on unknown story '{dep}'")
                }
                UnresolvedReason::DependencyCycle(members) => {
                    format!("dependency cycle: {}", members.join(" -> "))
                }
                UnresolvedReason::BlockedBy(dep) => {
                    format!("blocked by unresolved story '{dep}'")
                }
            };
            println!("Unresolved: {} ({why})", unresolved.id);
        }
        println!(
            "Project end date: {}",
            timeline.end_date(self.project_start).format("%Y-%m-%d")
        );
        self.last_timeline = timeline.scheduled;
    }
}

fn main() {
    let mut session = Session::new();

    println!("Sprint Planner (CLI) - type 'help' for commands\n");

    let stdin = io::stdin();
    let mut line = String::new();
    loop {
        print!("> ");
        let _ = io::stdout().flush();
        line.clear();
        if stdin.read_line(&mut line).is_err() || line.is_empty() {
            break;
        }
        let input = line.trim();
        if input.is_empty() {
            continue;
        }

        let mut parts = input.split_whitespace();
        let cmd = parts.next().unwrap_or("");

        match cmd {
            "help" => print_help(),
            "show" => print_backlog(&session.stories),
            "add" => {
                let id = parts.next();
                let epic = parts.next();
                let min = parts.next().and_then(|v| v.parse::<u32>().ok());
                let max = parts.next().and_then(|v| v.parse::<u32>().ok());
                let title = parts.collect::<Vec<_>>().join(" ");
                match (id, epic, min, max) {
                    (Some(id), Some(epic), Some(min), Some(max)) if !title.is_empty() => {
                        session.stories.retain(|s| s.id != id);
                        session
                            .stories
                            .push(UserStory::new(id, title, epic, min, max));
                        if let Err(err) = validate_stories(&session.stories) {
                            println!("Warning: {err}");
                        }
                        println!("Added story {id}.");
                    }
                    _ => println!("Usage: add <id> <epic> <min> <max> <title...>"),
                }
            }
            "deps" => {
                let id = parts.next();
                let csv_list = parts.next();
                match (id, csv_list) {
                    (Some(id), Some(csv_list)) => {
                        match session.stories.iter_mut().find(|s| s.id == id) {
                            Some(story) => {
                                story.dependencies = parse_dep_list(csv_list);
                                println!("Set dependencies for {id}.");
                            }
                            None => println!("No story with id '{id}'."),
                        }
                    }
                    _ => println!("Usage: deps <id> <csv>"),
                }
            }
            "delete" => match parts.next() {
                Some(id) => {
                    let before = session.stories.len();
                    session.stories.retain(|s| s.id != id);
                    if session.stories.len() < before {
                        println!("Deleted story {id}.");
                    } else {
                        println!("No story with id '{id}'.");
                    }
                }
                None => println!("Usage: delete <id>"),
            },
            "start" => match parts.next().map(|v| NaiveDate::parse_from_str(v, "%Y-%m-%d")) {
                Some(Ok(date)) => {
                    session.project_start = date;
                    println!("Project start set to {}.", date.format("%Y-%m-%d"));
                }
                _ => println!("Usage: start <YYYY-MM-DD>"),
            },
            "mode" => match parts.next().and_then(EstimationMode::from_str) {
                Some(mode) => {
                    session.mode = mode;
                    println!("Estimation mode set to {}.", mode.as_str());
                }
                None => println!("Usage: mode <optimistic|pessimistic>"),
            },
            "team" => match parts.next().and_then(|v| v.parse::<usize>().ok()) {
                Some(n) if n > 0 => {
                    session.team_size = n;
                    println!("Team size set to {n}.");
                }
                _ => println!("Usage: team <n>  (n >= 1)"),
            },
            "plan" => session.plan(),
            "end" => {
                let end = sprint_planner::compute_project_end_date(
                    &session.stories,
                    session.project_start,
                    session.mode,
                    session.team_size,
                );
                println!("Project end date: {}", end.format("%Y-%m-%d"));
            }
            "save" => {
                let format = parts.next();
                let path = parts.next();
                match (format, path) {
                    (Some("json"), Some(path)) => match save_plan_to_json(&session.snapshot(), path)
                    {
                        Ok(()) => println!("Plan saved to {path}."),
                        Err(err) => println!("Save failed: {err}"),
                    },
                    (Some("csv"), Some(path)) => {
                        match save_stories_to_csv(&session.stories, path) {
                            Ok(()) => println!("Backlog saved to {path}."),
                            Err(err) => println!("Save failed: {err}"),
                        }
                    }
                    _ => println!("Usage: save json|csv <path>"),
                }
            }
            "load" => {
                let format = parts.next();
                let path = parts.next();
                match (format, path) {
                    (Some("json"), Some(path)) => match load_plan_from_json(path) {
                        Ok(snapshot) => {
                            session.project_start = snapshot.project_start;
                            session.mode = snapshot.mode;
                            session.team_size = snapshot.team_size;
                            session.settings = snapshot.settings;
                            session.stories = snapshot.stories;
                            println!("Plan loaded from {path}.");
                        }
                        Err(err) => println!("Load failed: {err}"),
                    },
                    (Some("csv"), Some(path)) => match load_stories_from_csv(path) {
                        Ok(stories) => {
                            session.stories = stories;
                            println!("Backlog loaded from {path}.");
                        }
                        Err(err) => println!("Load failed: {err}"),
                    },
                    _ => println!("Usage: load json|csv <path>"),
                }
            }
            "export" => match parts.next() {
                Some(path) => {
                    if session.last_timeline.is_empty() {
                        println!("Nothing to export; run 'plan' first.");
                    } else {
                        match export_timeline_to_csv(&session.last_timeline, path) {
                            Ok(()) => println!("Timeline exported to {path}."),
                            Err(err) => println!("Export failed: {err}"),
                        }
                    }
                }
                None => println!("Usage: export <path>"),
            },
            "quit" | "exit" => break,
            other => println!("Unknown command '{other}'; type 'help' for commands."),
        }
    }
}
