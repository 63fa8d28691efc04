//! Line commands typed by the user, standing in for the listing page's
//! search form, pager and tab visibility.

use std::time::Instant;

use jobboard_core::{ListingViewModel, Msg, PollSettings, RefreshRequest, SearchFilters};
use thiserror::Error;

pub const HELP: &str = "\
commands:
  search [words] [location=.. type=.. mode=.. category=N min=N max=N]
  page N | next | prev      change page (1-based)
  refresh                   reload the current page now
  clear                     drop all filters
  hide | show               simulate the page losing or regaining focus
  stop | start              pause or resume background polling
  dismiss                   close the notification
  help | quit";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Search(SearchFilters),
    Page(u32),
    Next,
    Prev,
    Refresh,
    Clear,
    Hide,
    Show,
    Stop,
    Start,
    Dismiss,
    Help,
    Quit,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CommandError {
    #[error("unknown command {0:?}, type `help`")]
    Unknown(String),
    #[error("{0}")]
    Usage(&'static str),
    #[error("unknown filter {0:?}")]
    UnknownFilter(String),
    #[error("{name} expects a number, got {value:?}")]
    NotANumber { name: String, value: String },
}

pub fn parse_command(line: &str) -> Result<Option<Command>, CommandError> {
    let mut words = line.split_whitespace();
    let Some(head) = words.next() else {
        return Ok(None);
    };
    let rest: Vec<&str> = words.collect();

    let command = match head.to_ascii_lowercase().as_str() {
        "search" | "s" => Command::Search(parse_filters(&rest)?),
        "page" | "p" => {
            let [number] = rest[..] else {
                return Err(CommandError::Usage("usage: page N"));
            };
            let page = parse_number::<u32>("page", number)?;
            if page == 0 {
                return Err(CommandError::Usage("pages start at 1"));
            }
            Command::Page(page - 1)
        }
        "next" | "n" => Command::Next,
        "prev" => Command::Prev,
        "refresh" | "r" => Command::Refresh,
        "clear" => Command::Clear,
        "hide" => Command::Hide,
        "show" => Command::Show,
        "stop" => Command::Stop,
        "start" => Command::Start,
        "dismiss" => Command::Dismiss,
        "help" | "?" => Command::Help,
        "quit" | "q" | "exit" => Command::Quit,
        other => return Err(CommandError::Unknown(other.to_string())),
    };
    Ok(Some(command))
}

fn parse_filters(words: &[&str]) -> Result<SearchFilters, CommandError> {
    let mut filters = SearchFilters::default();
    let mut keyword = Vec::new();
    for word in words {
        let Some((name, value)) = word.split_once('=') else {
            keyword.push(*word);
            continue;
        };
        match name.to_ascii_lowercase().as_str() {
            "keyword" | "q" => keyword.push(value),
            "location" | "loc" => filters.location = Some(value.replace('_', " ")),
            "type" => filters.job_type = Some(value.to_ascii_uppercase()),
            "mode" => filters.work_mode = Some(value.to_ascii_uppercase()),
            "category" => filters.category_id = Some(parse_number(name, value)?),
            "min" => filters.salary_min = Some(parse_number(name, value)?),
            "max" => filters.salary_max = Some(parse_number(name, value)?),
            _ => return Err(CommandError::UnknownFilter(name.to_string())),
        }
    }
    if !keyword.is_empty() {
        filters.keyword = Some(keyword.join(" "));
    }
    Ok(filters.normalized())
}

fn parse_number<T: std::str::FromStr>(name: &str, value: &str) -> Result<T, CommandError> {
    value.parse().map_err(|_| CommandError::NotANumber {
        name: name.to_string(),
        value: value.to_string(),
    })
}

/// What the host does with a parsed command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    Dispatch(Msg),
    /// Forwarded only while the coordinator watches visibility.
    Visibility(bool),
    ShowHelp,
    Quit,
}

impl Command {
    pub fn into_action(self, view: &ListingViewModel, poll: PollSettings, now: Instant) -> Action {
        let current = view.pagination.current_page;
        match self {
            Command::Search(filters) => Action::Dispatch(Msg::SearchSubmitted { filters, now }),
            Command::Page(page) => Action::Dispatch(Msg::PageChanged { page, now }),
            Command::Next => Action::Dispatch(Msg::PageChanged {
                page: current.saturating_add(1),
                now,
            }),
            Command::Prev => Action::Dispatch(Msg::PageChanged {
                page: current.saturating_sub(1),
                now,
            }),
            Command::Refresh => Action::Dispatch(Msg::RefreshRequested {
                request: RefreshRequest::USER,
                now,
            }),
            Command::Clear => Action::Dispatch(Msg::FiltersCleared { now }),
            Command::Hide => Action::Visibility(false),
            Command::Show => Action::Visibility(true),
            Command::Stop => Action::Dispatch(Msg::StopPolling),
            Command::Start => Action::Dispatch(Msg::StartPolling(poll)),
            Command::Dismiss => Action::Dispatch(Msg::NoticeDismissed),
            Command::Help => Action::ShowHelp,
            Command::Quit => Action::Quit,
        }
    }
}

#[cfg(test)]
mod tests {
    use std::time::Instant;

    use jobboard_core::{ListingViewModel, Msg, Pagination, PollSettings, SearchFilters};
    use pretty_assertions::assert_eq;

    use super::{parse_command, Action, Command, CommandError};

    #[test]
    fn blank_line_is_ignored() {
        assert_eq!(parse_command("   "), Ok(None));
    }

    #[test]
    fn search_collects_keyword_and_filters() {
        let command = parse_command("search rust backend loc=Ho_Chi_Minh mode=remote min=1000")
            .unwrap()
            .unwrap();
        assert_eq!(
            command,
            Command::Search(SearchFilters {
                keyword: Some("rust backend".to_string()),
                location: Some("Ho Chi Minh".to_string()),
                work_mode: Some("REMOTE".to_string()),
                salary_min: Some(1000),
                ..SearchFilters::default()
            })
        );
    }

    #[test]
    fn bare_search_clears_keyword() {
        assert_eq!(
            parse_command("search").unwrap(),
            Some(Command::Search(SearchFilters::default()))
        );
    }

    #[test]
    fn filter_errors_are_reported() {
        assert_eq!(
            parse_command("search colour=red"),
            Err(CommandError::UnknownFilter("colour".to_string()))
        );
        assert!(matches!(
            parse_command("search max=lots"),
            Err(CommandError::NotANumber { .. })
        ));
    }

    #[test]
    fn pages_are_one_based() {
        assert_eq!(parse_command("page 3").unwrap(), Some(Command::Page(2)));
        assert!(matches!(parse_command("page 0"), Err(CommandError::Usage(_))));
        assert!(matches!(parse_command("page"), Err(CommandError::Usage(_))));
        assert!(matches!(
            parse_command("page two"),
            Err(CommandError::NotANumber { .. })
        ));
    }

    #[test]
    fn simple_commands_parse() {
        for (line, expected) in [
            ("next", Command::Next),
            ("prev", Command::Prev),
            ("refresh", Command::Refresh),
            ("clear", Command::Clear),
            ("hide", Command::Hide),
            ("SHOW", Command::Show),
            ("stop", Command::Stop),
            ("start", Command::Start),
            ("dismiss", Command::Dismiss),
            ("help", Command::Help),
            ("q", Command::Quit),
        ] {
            assert_eq!(parse_command(line).unwrap(), Some(expected), "{line}");
        }
        assert!(matches!(parse_command("jump"), Err(CommandError::Unknown(_))));
    }

    #[test]
    fn paging_is_relative_to_current_page() {
        let now = Instant::now();
        let view = ListingViewModel {
            pagination: Pagination {
                current_page: 0,
                total_pages: 3,
                total_elements: 25,
            },
            ..ListingViewModel::default()
        };
        assert_eq!(
            Command::Prev.into_action(&view, PollSettings::default(), now),
            Action::Dispatch(Msg::PageChanged { page: 0, now })
        );
        assert_eq!(
            Command::Next.into_action(&view, PollSettings::default(), now),
            Action::Dispatch(Msg::PageChanged { page: 1, now })
        );
        assert_eq!(
            Command::Hide.into_action(&view, PollSettings::default(), now),
            Action::Visibility(false)
        );
        assert_eq!(
            Command::Start.into_action(&view, PollSettings::default(), now),
            Action::Dispatch(Msg::StartPolling(PollSettings::default()))
        );
    }
}
