use crate::error::{AppError, AppResult};
use crate::models::MovieId;

/// One line of user input in the interactive session
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// `search <text>` or a bare line of text
    Search(String),
    /// `pick <n>`: choose the n-th listed search result (1-based)
    Pick(usize),
    /// `id <n>` sets the movie id, `id` alone unsets it
    EnterId(Option<MovieId>),
    /// `recommend [n]`
    Recommend(Option<MovieId>),
    Show,
    Help,
    Quit,
    Empty,
}

pub const HELP: &str = "\
Commands:
  search <name>    search movies by name (a bare line of text does the same)
  pick <n>         choose the n-th search result
  id <n>           enter a movie id directly (`id` alone clears it)
  recommend [id]   recommend movies for the selected id
  show             print the current state
  help             print this help
  quit             leave";

/// Parses one input line
pub fn parse(line: &str) -> AppResult<Command> {
    let line = line.trim();
    if line.is_empty() {
        return Ok(Command::Empty);
    }

    let (keyword, rest) = match line.split_once(char::is_whitespace) {
        Some((keyword, rest)) => (keyword, rest.trim()),
        None => (line, ""),
    };

    let command = match keyword.to_lowercase().as_str() {
        "search" | "s" => Command::Search(rest.to_string()),
        "pick" | "p" => Command::Pick(parse_position(rest)?),
        "id" => Command::EnterId(parse_optional_id(rest)?),
        "recommend" | "rec" | "r" => Command::Recommend(parse_optional_id(rest)?),
        "show" if rest.is_empty() => Command::Show,
        "help" | "?" if rest.is_empty() => Command::Help,
        "quit" | "exit" | "q" if rest.is_empty() => Command::Quit,
        _ => Command::Search(line.to_string()),
    };

    Ok(command)
}

fn parse_position(text: &str) -> AppResult<usize> {
    match text.parse::<usize>() {
        Ok(position) if position > 0 => Ok(position),
        _ => Err(AppError::InvalidInput(format!(
            "expected a result number, got {:?}",
            text
        ))),
    }
}

fn parse_optional_id(text: &str) -> AppResult<Option<MovieId>> {
    if text.is_empty() {
        return Ok(None);
    }
    text.parse::<MovieId>()
        .map(Some)
        .map_err(|_| AppError::InvalidInput(format!("expected a numeric movie id, got {:?}", text)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bare_text_and_search_keyword_are_the_same_search() {
        assert_eq!(parse("Batman").unwrap(), Command::Search("Batman".into()));
        assert_eq!(parse("search Batman").unwrap(), Command::Search("Batman".into()));
        assert_eq!(
            parse("  The Dark Knight ").unwrap(),
            Command::Search("The Dark Knight".into())
        );
    }

    #[test]
    fn test_search_without_text_is_blank_search() {
        assert_eq!(parse("search").unwrap(), Command::Search(String::new()));
    }

    #[test]
    fn test_pick() {
        assert_eq!(parse("pick 2").unwrap(), Command::Pick(2));
        assert!(parse("pick 0").is_err());
        assert!(parse("pick two").is_err());
    }

    #[test]
    fn test_id_and_recommend() {
        assert_eq!(parse("id 272").unwrap(), Command::EnterId(Some(272)));
        assert_eq!(parse("id").unwrap(), Command::EnterId(None));
        assert!(parse("id abc").is_err());

        assert_eq!(parse("recommend").unwrap(), Command::Recommend(None));
        assert_eq!(parse("rec 999999").unwrap(), Command::Recommend(Some(999_999)));
    }

    #[test]
    fn test_keywords_with_trailing_text_fall_back_to_search() {
        assert_eq!(parse("quit").unwrap(), Command::Quit);
        assert_eq!(
            parse("Quit While Ahead").unwrap(),
            Command::Search("Quit While Ahead".into())
        );
        assert_eq!(parse("show").unwrap(), Command::Show);
        assert_eq!(parse("Show Boat").unwrap(), Command::Search("Show Boat".into()));
    }

    #[test]
    fn test_empty_line() {
        assert_eq!(parse("   ").unwrap(), Command::Empty);
    }
}
