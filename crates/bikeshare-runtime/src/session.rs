//! Interactive session: filter acquisition, menu loop and restart loop.
//!
//! All input and output go through one [`LinePrompter`], so the whole dialogue
//! can be scripted in tests. Typing `end` anywhere unwinds the session with
//! [`BikeshareError::Aborted`].

use std::io::{BufRead, Write};
use std::path::PathBuf;
use std::time::Instant;

use bikeshare_core::error::{BikeshareError, Result};
use bikeshare_core::formatting::format_count;
use bikeshare_core::models::{FilterSelection, TripTable};
use bikeshare_core::options::{Choice, LinePrompter, RETRY_PROMPT};
use bikeshare_core::registry::{describe_cities, City, MONTHS, WEEKDAYS};
use bikeshare_data::analysis::{load_selection, AnalysisResult};
use bikeshare_data::statistics::{duration_stats, station_stats, time_stats, user_stats};
use bikeshare_ui::report::{
    write_duration_stats, write_separator, write_station_stats, write_time_stats, write_timing,
    write_user_stats,
};
use bikeshare_ui::table_view::render_rows;
use bikeshare_ui::terminal::clear_screen;
use tracing::{error, info};

use crate::paginator::{Paginator, SortDirection, SortKey};

// ── Prompts ───────────────────────────────────────────────────────────────────

const CITY_PROMPT: &str = "\nFor what city(ies) do you want do select data, \
New York City, Chicago or Washington? Use commas to list the names.\n>";

const MONTH_PROMPT: &str = "\nFrom January to June, for what month(s) do you want \
do filter data? Use commas to list the names.\n>";

const WEEKDAY_PROMPT: &str = "\nFor what weekday(s) do you want do filter bikeshare \
data? Use commas to list the names.\n>";

const MENU_PROMPT: &str = "\nPlease select the information you would like to obtain.\n\n \
[ts] Time Stats\n [ss] Station Stats\n [tds] Trip Duration Stats\n [us] User Stats\n \
[rd] Display Raw Data\n [r] Restart\n\n>";

const RESUME_PROMPT: &str =
    "\nWould you like to continue from where you stopped last time? \n [y] Yes\n [n] No\n\n>";

const SORT_PROMPT: &str = "\nHow would you like to sort the way the data is displayed? \
Hit Enter to view unsorted.\n \n [st] Start Time\n [et] End Time\n [td] Trip Duration\n \
[ss] Start Station\n [es] End Station\n\n>";

const DIRECTION_PROMPT: &str =
    "\nWould you like it to be sorted ascending or descending? \n [a] Ascending\n [d] Descending\n\n>";

const KEEP_PRINTING_PROMPT: &str = "Do you want to keep printing raw data?\n\n[y]Yes\n[n]No\n\n>";

const RESTART_PROMPT: &str = "\nWould you like to restart?\n\n[y]Yes\n[n]No\n\n>";

// ── Menu ──────────────────────────────────────────────────────────────────────

/// A statistics view offered by the menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatsView {
    Time,
    Station,
    Duration,
    User,
}

/// One entry of the main menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuAction {
    Stats(StatsView),
    RawData,
    Restart,
}

impl MenuAction {
    pub const CODES: &'static [&'static str] = &["ts", "ss", "tds", "us", "rd", "r"];

    pub fn from_code(code: &str) -> Option<MenuAction> {
        match code {
            "ts" => Some(MenuAction::Stats(StatsView::Time)),
            "ss" => Some(MenuAction::Stats(StatsView::Station)),
            "tds" => Some(MenuAction::Stats(StatsView::Duration)),
            "us" => Some(MenuAction::Stats(StatsView::User)),
            "rd" => Some(MenuAction::RawData),
            "r" => Some(MenuAction::Restart),
            _ => None,
        }
    }
}

// ── Session ───────────────────────────────────────────────────────────────────

pub struct Session<R, W> {
    prompter: LinePrompter<R, W>,
    data_dir: PathBuf,
    clear: bool,
}

impl<R: BufRead, W: Write> Session<R, W> {
    /// `clear` controls whether the terminal is cleared between views.
    pub fn new(prompter: LinePrompter<R, W>, data_dir: PathBuf, clear: bool) -> Self {
        Self {
            prompter,
            data_dir,
            clear,
        }
    }

    /// Run until the user declines to restart.
    ///
    /// Returns `Err(BikeshareError::Aborted)` when the user types `end` or
    /// input runs out; callers treat that as a normal exit.
    pub fn run(&mut self) -> Result<()> {
        loop {
            self.clear()?;
            let selection = self.obtain_filters()?;

            match self.load(&selection) {
                Ok(result) => self.explore(&result)?,
                Err(err) if err.is_abort() => return Err(err),
                Err(err) => {
                    error!(error = %err, "failed to load selection");
                    self.prompter
                        .say(&format!("\nThe data could not be loaded: {err}"))?;
                }
            }

            if !self.confirm(RESTART_PROMPT)? {
                info!("session finished");
                return Ok(());
            }
            info!("session restarted");
        }
    }

    pub fn into_prompter(self) -> LinePrompter<R, W> {
        self.prompter
    }

    // ── Filters ───────────────────────────────────────────────────────────────

    /// Ask for cities, months and weekdays until the user confirms them.
    fn obtain_filters(&mut self) -> Result<FilterSelection> {
        self.prompter
            .say("\n\nLet's explore some US bikeshare data!\n")?;
        self.prompter
            .say("Type end at any time if you would like to exit the program.\n")?;

        loop {
            let cities = self.ask_many(CITY_PROMPT, &City::keys())?;
            let months = self.ask_many(MONTH_PROMPT, &MONTHS)?;
            let weekdays = self.ask_many(WEEKDAY_PROMPT, &WEEKDAYS)?;
            let selection = FilterSelection::from_names(&cities, &months, &weekdays)?;

            let confirm = format!(
                "\nPlease confirm that you would like to apply the following filter(s) \
                 to the bikeshare data.\n\n City(ies): {}\n Month(s): {}\n Weekday(s): {}\
                 \n\n [y] Yes\n [n] No\n\n>",
                describe_cities(selection.cities()),
                selection.month_labels().join(", "),
                selection.weekday_labels().join(", "),
            );

            if self.confirm(&confirm)? {
                write_separator(self.prompter.writer())?;
                info!(
                    cities = %describe_cities(selection.cities()),
                    months = selection.months().len(),
                    weekdays = selection.weekdays().len(),
                    "filters confirmed"
                );
                return Ok(selection);
            }
            self.prompter.say("\nLet's try this again!")?;
        }
    }

    fn load(&mut self, selection: &FilterSelection) -> Result<AnalysisResult> {
        self.prompter
            .say("\nThe program is loading the data for the filters of your option.")?;
        let result = load_selection(&self.data_dir, selection)?;
        self.prompter.say(&format!(
            "{} of {} trips match the selected filters.",
            format_count(result.metadata.rows_matched),
            format_count(result.metadata.rows_loaded),
        ))?;
        write_timing(self.prompter.writer(), result.metadata.load_time_seconds)?;
        Ok(result)
    }

    // ── Menu loop ─────────────────────────────────────────────────────────────

    /// Serve menu requests against one loaded table until `r` is chosen.
    fn explore(&mut self, result: &AnalysisResult) -> Result<()> {
        let table = &result.table;
        let mut pager = Paginator::new(table.len());

        loop {
            let code = self.ask_one(MENU_PROMPT, MenuAction::CODES)?;
            let Some(action) = MenuAction::from_code(&code) else {
                continue;
            };
            self.clear()?;

            match action {
                MenuAction::Restart => return Ok(()),
                MenuAction::RawData => self.raw_data(table, &mut pager)?,
                MenuAction::Stats(view) => self.show_stats(view, table)?,
            }
        }
    }

    /// Compute and print one statistics view, followed by its timing line.
    fn show_stats(&mut self, view: StatsView, table: &TripTable) -> Result<()> {
        let started = Instant::now();
        let out = self.prompter.writer();
        match view {
            StatsView::Time => write_time_stats(out, &time_stats(&table.records))?,
            StatsView::Station => write_station_stats(out, &station_stats(&table.records))?,
            StatsView::Duration => write_duration_stats(out, &duration_stats(&table.records))?,
            StatsView::User => write_user_stats(out, &user_stats(table), &table.cities)?,
        }
        write_timing(out, started.elapsed().as_secs_f64())?;
        Ok(())
    }

    // ── Raw data ──────────────────────────────────────────────────────────────

    fn raw_data(&mut self, table: &TripTable, pager: &mut Paginator) -> Result<()> {
        self.prompter.say("\nYou opted to view raw data.")?;

        if table.is_empty() {
            self.prompter
                .say("\nNo trips match the selected filters.")?;
            return Ok(());
        }

        if pager.cursor() > 0 && !self.confirm(RESUME_PROMPT)? {
            pager.reset();
        }

        if pager.cursor() == 0 {
            let code = self.ask_one(SORT_PROMPT, SortKey::CODES)?;
            match SortKey::from_code(&code) {
                Some(key) => {
                    let answer = self.ask_one(DIRECTION_PROMPT, SortDirection::CODES)?;
                    let direction =
                        SortDirection::from_code(&answer).unwrap_or(SortDirection::Ascending);
                    pager.sort(&table.records, key, direction);
                }
                None => pager.reset(),
            }
        }

        loop {
            if pager.is_exhausted() {
                self.prompter
                    .say("\nThere is no more raw data to display.")?;
                return Ok(());
            }

            let rows = pager.next_page(&table.records);
            let out = self.prompter.writer();
            writeln!(out, "\n")?;
            render_rows(out, &table.columns, &rows)?;
            writeln!(out, "\n")?;

            if pager.is_exhausted() {
                self.prompter
                    .say("There is no more raw data to display.")?;
                return Ok(());
            }
            if !self.confirm(KEEP_PRINTING_PROMPT)? {
                return Ok(());
            }
        }
    }

    // ── Prompt helpers ────────────────────────────────────────────────────────

    /// Single-choice question; multi-value answers are asked again.
    fn ask_one(&mut self, prompt: &str, allowed: &[&str]) -> Result<String> {
        let mut prompt = prompt;
        loop {
            match self.prompter.ask(prompt, allowed)? {
                Choice::Value(value) => return Ok(value),
                Choice::Values(_) => prompt = RETRY_PROMPT,
                Choice::Abort => return Err(BikeshareError::Aborted),
            }
        }
    }

    /// Yes/no question; `true` only for `y`.
    fn confirm(&mut self, prompt: &str) -> Result<bool> {
        let mut prompt = prompt;
        loop {
            match self.prompter.confirm(prompt)? {
                Choice::Abort => return Err(BikeshareError::Aborted),
                Choice::Values(_) => prompt = RETRY_PROMPT,
                answer => return Ok(answer.is("y")),
            }
        }
    }

    /// Multi-select question.
    fn ask_many(&mut self, prompt: &str, allowed: &[&str]) -> Result<Vec<String>> {
        match self.prompter.ask(prompt, allowed)? {
            Choice::Abort => Err(BikeshareError::Aborted),
            choice => Ok(choice.into_values()),
        }
    }

    fn clear(&mut self) -> Result<()> {
        if self.clear {
            clear_screen(self.prompter.writer())?;
        }
        Ok(())
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;
    use tempfile::TempDir;

    const CHICAGO: &str = "\
,Start Time,End Time,Trip Duration,Start Station,End Station,User Type,Gender,Birth Year
1,2017-06-05 08:00:00,2017-06-05 08:05:00,300,S1,E1,Subscriber,Male,1980
2,2017-06-05 09:00:00,2017-06-05 09:05:00,100,S2,E2,Subscriber,Female,1990
3,2017-06-12 10:00:00,2017-06-12 10:05:00,700,S3,E3,Customer,,
4,2017-06-12 11:00:00,2017-06-12 11:05:00,200,S4,E4,Subscriber,Male,1980
5,2017-06-19 12:00:00,2017-06-19 12:05:00,600,S5,E5,Subscriber,Male,1975
6,2017-06-19 13:00:00,2017-06-19 13:05:00,500,S6,E6,Customer,Female,2001
7,2017-06-26 14:00:00,2017-06-26 14:05:00,400,S7,E7,Subscriber,Male,1980
8,2017-05-01 08:00:00,2017-05-01 08:05:00,900,S8,E8,Subscriber,Male,1960
";

    const WASHINGTON: &str = "\
,Start Time,End Time,Trip Duration,Start Station,End Station,User Type
10,2017-06-05 08:00:00,2017-06-05 08:10:00,600.2,Dupont,Union,Subscriber
11,2017-06-12 08:00:00,2017-06-12 08:10:00,599.9,Dupont,Union,Customer
";

    fn data_dir() -> TempDir {
        let tmp = TempDir::new().expect("tempdir");
        std::fs::write(tmp.path().join("chicago.csv"), CHICAGO).unwrap();
        std::fs::write(tmp.path().join("washington.csv"), WASHINGTON).unwrap();
        tmp
    }

    fn run(dir: &TempDir, script: &str) -> (Result<()>, String) {
        let prompter = LinePrompter::new(Cursor::new(script.as_bytes().to_vec()), Vec::new());
        let mut session = Session::new(prompter, dir.path().to_path_buf(), false);
        let result = session.run();
        let (_, out) = session.into_prompter().into_parts();
        (result, String::from_utf8(out).unwrap())
    }

    fn pos(haystack: &str, needle: &str) -> usize {
        haystack
            .find(needle)
            .unwrap_or_else(|| panic!("{needle:?} not in output"))
    }

    // ── filters and restart ───────────────────────────────────────────────────

    #[test]
    fn test_time_stats_then_quit() {
        let dir = data_dir();
        let (result, out) = run(&dir, "chicago\njune\nmonday\ny\nts\nr\nn\n");

        assert!(result.is_ok());
        assert!(out.contains("Let's explore some US bikeshare data!"));
        assert!(out.contains(" City(ies): Chicago\n Month(s): June\n Weekday(s): Monday"));
        assert!(out.contains("the month with the most travels is: June."));
        assert!(out.contains("the most common start hour is: 8."));
        assert!(out.contains("7 of 8 trips match the selected filters."));
        assert!(out.contains("This took "));
        assert!(out.contains("Would you like to restart?"));
    }

    #[test]
    fn test_declined_confirmation_asks_again() {
        let dir = data_dir();
        let (result, out) = run(
            &dir,
            "chicago\njune\nmonday\nn\nwashington\njune\nmonday\ny\nr\nn\n",
        );

        assert!(result.is_ok());
        assert!(out.contains("Let's try this again!"));
        assert!(out.contains(" City(ies): Washington\n"));
    }

    #[test]
    fn test_multi_select_confirmation_lists_all_values() {
        let dir = data_dir();
        let (_, out) = run(&dir, "washington, chicago\nmay,june\nmonday\ny\nr\nn\n");
        assert!(out.contains(" City(ies): Washington, Chicago\n Month(s): May, June\n"));
    }

    #[test]
    fn test_restart_starts_over() {
        let dir = data_dir();
        let (result, out) = run(
            &dir,
            "chicago\njune\nmonday\ny\nr\ny\nwashington\njune\nmonday\ny\nr\nn\n",
        );
        assert!(result.is_ok());
        assert_eq!(out.matches("Let's explore some US bikeshare data!").count(), 2);
    }

    // ── abort ─────────────────────────────────────────────────────────────────

    #[test]
    fn test_end_at_first_prompt_aborts() {
        let dir = data_dir();
        let (result, _) = run(&dir, "end\n");
        assert!(matches!(result, Err(BikeshareError::Aborted)));
    }

    #[test]
    fn test_end_in_menu_aborts() {
        let dir = data_dir();
        let (result, _) = run(&dir, "chicago\njune\nmonday\ny\nEND\n");
        assert!(matches!(result, Err(BikeshareError::Aborted)));
    }

    #[test]
    fn test_closed_input_aborts() {
        let dir = data_dir();
        let (result, _) = run(&dir, "chicago\njune\n");
        assert!(matches!(result, Err(BikeshareError::Aborted)));
    }

    // ── menu ──────────────────────────────────────────────────────────────────

    #[test]
    fn test_menu_codes() {
        assert_eq!(
            MenuAction::from_code("tds"),
            Some(MenuAction::Stats(StatsView::Duration))
        );
        assert_eq!(MenuAction::from_code("rd"), Some(MenuAction::RawData));
        assert_eq!(MenuAction::from_code("r"), Some(MenuAction::Restart));
        assert_eq!(MenuAction::from_code("x"), None);
        assert!(MenuAction::CODES
            .iter()
            .all(|code| MenuAction::from_code(code).is_some()));
    }

    #[test]
    fn test_yes_no_rejects_multi_value_answer() {
        let dir = data_dir();
        let (result, out) = run(&dir, "chicago\njune\nmonday\ny,n\ny\nr\ny,y\nn\n");

        assert!(result.is_ok());
        assert_eq!(out.matches("Something is not right.").count(), 2);
        assert_eq!(out.matches("Let's explore some US bikeshare data!").count(), 1);
    }

    #[test]
    fn test_menu_rejects_multi_value_answer() {
        let dir = data_dir();
        let (result, out) = run(&dir, "chicago\njune\nmonday\ny\nts,ss\nss\nr\nn\n");

        assert!(result.is_ok());
        assert!(out.contains("Something is not right."));
        assert!(out.contains("the most common start station is: S1."));
        assert!(!out.contains("most travels is"));
    }

    #[test]
    fn test_duration_stats() {
        let dir = data_dir();
        let (_, out) = run(&dir, "chicago\njune\nmonday\ny\ntds\nr\nn\n");
        // 300+100+700+200+600+500+400 = 2800s over 7 trips.
        assert!(out.contains("the total travel time is : 0d 0h 46m 40s."));
        assert!(out.contains("the mean travel time is : 6m 40s."));
    }

    #[test]
    fn test_user_stats_for_city_without_demographics() {
        let dir = data_dir();
        let (_, out) = run(&dir, "washington\njune\nmonday\ny\nus\nr\nn\n");
        assert!(out.contains("We're sorry! There is no data of user genders for Washington."));
        assert!(out.contains("We're sorry! There is no data of birth year for Washington."));
    }

    #[test]
    fn test_user_stats_with_demographics() {
        let dir = data_dir();
        let (_, out) = run(&dir, "chicago\njune\nmonday\ny\nus\nr\nn\n");
        assert!(out.contains("Distribution for each gender:"));
        assert!(out.contains("was born in: 1975."));
        assert!(out.contains("was born in: 2001."));
        assert!(out.contains("amongst riders is: 1980."));
    }

    // ── load failure ──────────────────────────────────────────────────────────

    #[test]
    fn test_missing_source_offers_restart() {
        let dir = data_dir();
        let (result, out) = run(&dir, "new york city\njune\nmonday\ny\nn\n");

        assert!(result.is_ok());
        assert!(out.contains("The data could not be loaded:"));
        assert!(out.contains("new_york_city.csv"));
        assert!(out.contains("Would you like to restart?"));
    }

    // ── raw data ──────────────────────────────────────────────────────────────

    #[test]
    fn test_raw_data_pages_until_exhausted() {
        let dir = data_dir();
        let (result, out) = run(&dir, "chicago\njune\nmonday\ny\nrd\n\ny\nr\nn\n");

        assert!(result.is_ok());
        assert!(!out.contains("sorted ascending or descending"));
        assert!(pos(&out, "S5") < pos(&out, "keep printing"));
        assert!(pos(&out, "S6") > pos(&out, "keep printing"));
        assert!(out.contains("There is no more raw data to display."));
        assert!(!out.contains("S8"));
    }

    #[test]
    fn test_raw_data_sorted_descending_by_duration() {
        let dir = data_dir();
        let (_, out) = run(&dir, "chicago\njune\nmonday\ny\nrd\ntd\nd\nn\nr\nn\n");

        // 700, 600, 500, 400, 300 on the first page.
        assert!(pos(&out, "S3") < pos(&out, "S5"));
        assert!(pos(&out, "S5") < pos(&out, "S6"));
        assert!(pos(&out, "S6") < pos(&out, "S7"));
        assert!(pos(&out, "S7") < pos(&out, "S1"));
        assert!(!out.contains("S2"));
    }

    #[test]
    fn test_raw_data_resumes_with_sort_kept() {
        let dir = data_dir();
        let (_, out) = run(
            &dir,
            "chicago\njune\nmonday\ny\nrd\ntd\nd\nn\nrd\ny\nr\nn\n",
        );

        assert!(out.contains("continue from where you stopped"));
        // Second visit shows the remaining 200 and 100 trips, in that order.
        assert!(pos(&out, "S4") < pos(&out, "S2"));
        assert_eq!(out.matches("How would you like to sort").count(), 1);
    }

    #[test]
    fn test_raw_data_declined_resume_reoffers_sort() {
        let dir = data_dir();
        let (_, out) = run(
            &dir,
            "chicago\njune\nmonday\ny\nrd\n\nn\nrd\nn\n\nn\nr\nn\n",
        );

        assert_eq!(out.matches("How would you like to sort").count(), 2);
        assert_eq!(out.matches("S1").count(), 2);
    }

    #[test]
    fn test_raw_data_on_empty_selection() {
        let dir = data_dir();
        let (_, out) = run(&dir, "washington\njanuary\nsunday\ny\nrd\nr\nn\n");
        assert!(out.contains("No trips match the selected filters."));
    }
}
