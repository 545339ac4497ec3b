//! Description templates and clause extraction.
//!
//! Every parser here works on plain text and reports failures as
//! [`ClauseError`]; the passes attach the row number.

use std::sync::LazyLock;

use regex::Regex;

use crate::spec::{ClauseError, EnumClause};

// `\n?$`: a single trailing newline still counts as the end of the text.
static RGX_FEATURING_TAIL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(featuring.*)\n?$").expect("featuring tail pattern"));
static RGX_FEATURING_CLAUSE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"featuring ([^.]*)[.]").expect("featuring clause pattern"));
static RGX_SPORTS_CLAUSE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"sports? (.*)[.]\n?$").expect("sports clause pattern"));

////////////////////////////////////////////////////////////////////////////////
// #region Templates

/// Boilerplate written by the Half-Fill pass.
pub fn render_boilerplate(manufacturer: &str, product: &str, colour: &str) -> String {
    format!("The {product} from {manufacturer} comes in {colour} colour, featuring")
}

/// Opening of a fresh full description, completed by the featuring tail.
pub fn render_opening(manufacturer: &str, product: &str, colour: &str) -> String {
    format!("From {manufacturer} comes the {product} in {colour} colour, ")
}

/// Rephrase a full description as `"{manufacturer} offers ..."`.
pub fn rephrase_offers(description: &str, manufacturer: &str) -> String {
    description.replace(
        &format!("From {manufacturer} comes"),
        &format!("{manufacturer} offers"),
    )
}

/// Rephrase a boilerplate as `"Offered by {manufacturer}, the {product} ..."`.
pub fn rephrase_offered_by(description: &str, manufacturer: &str, product: &str) -> String {
    description.replace(
        &format!("The {product} from {manufacturer}"),
        &format!("Offered by {manufacturer}, the {product}"),
    )
}

/// Replace every occurrence of `colour_old` with `colour_new`.
///
/// An empty `colour_old` leaves the text unchanged.
pub fn replace_colour(description: &str, colour_old: &str, colour_new: &str) -> String {
    if colour_old.is_empty() {
        return description.to_string();
    }
    description.replace(colour_old, colour_new)
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
// #region Extraction

/// Text from the word `featuring` to the end of `description`, without a
/// trailing newline.
pub fn extract_featuring_tail(description: &str) -> Result<&str, ClauseError> {
    RGX_FEATURING_TAIL
        .captures(description)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
        .ok_or(ClauseError::Missing(EnumClause::FeaturingTail))
}

/// Byte span of the text between `featuring ` and the next period.
pub fn find_featuring_clause(description: &str) -> Result<(usize, usize), ClauseError> {
    find_capture(&RGX_FEATURING_CLAUSE, description, EnumClause::Featuring)
}

/// Byte span of the text between `sport`/`sports` and the final period.
pub fn find_sports_clause(description: &str) -> Result<(usize, usize), ClauseError> {
    find_capture(&RGX_SPORTS_CLAUSE, description, EnumClause::Sports)
}

fn find_capture(
    regex: &Regex,
    description: &str,
    clause: EnumClause,
) -> Result<(usize, usize), ClauseError> {
    let group = regex
        .captures(description)
        .and_then(|caps| caps.get(1))
        .ok_or(ClauseError::Missing(clause))?;
    if group.is_empty() {
        return Err(ClauseError::Empty(clause));
    }
    Ok((group.start(), group.end()))
}

/// Exchange the featuring-clause and sports-clause contents.
///
/// ```
/// use fillsheet::clause::swap_clauses;
///
/// let swapped = swap_clauses("featuring mesh panels. It also sports a gum sole.").unwrap();
/// assert_eq!(swapped, "featuring a gum sole. It also sports mesh panels.");
/// ```
pub fn swap_clauses(description: &str) -> Result<String, ClauseError> {
    let span_featuring = find_featuring_clause(description)?;
    let span_sports = find_sports_clause(description)?;

    let (span_first, span_second) = if span_featuring.0 <= span_sports.0 {
        (span_featuring, span_sports)
    } else {
        (span_sports, span_featuring)
    };
    if span_first.1 > span_second.0 {
        return Err(ClauseError::Overlapping);
    }

    let c_first = &description[span_first.0..span_first.1];
    let c_second = &description[span_second.0..span_second.1];

    let mut c_out = String::with_capacity(description.len());
    c_out.push_str(&description[..span_first.0]);
    c_out.push_str(c_second);
    c_out.push_str(&description[span_first.1..span_second.0]);
    c_out.push_str(c_first);
    c_out.push_str(&description[span_second.1..]);
    Ok(c_out)
}

// #endregion
////////////////////////////////////////////////////////////////////////////////

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_render_boilerplate() {
        assert_eq!(
            render_boilerplate("Calvin Klein", "Limited Edition Trunks", "Camo Print Black"),
            "The Limited Edition Trunks from Calvin Klein comes in Camo Print Black colour, featuring"
        );
    }

    #[test]
    fn test_extract_featuring_tail() {
        let c_text = "The Trunks from Calvin Klein comes in Black colour, featuring A. Also sports B.";
        assert_eq!(extract_featuring_tail(c_text).unwrap(), "featuring A. Also sports B.");
        assert_eq!(
            extract_featuring_tail("nothing to see"),
            Err(ClauseError::Missing(EnumClause::FeaturingTail))
        );
    }

    #[test]
    fn test_swap_clauses() {
        let c_text = "From Calvin Klein comes the Limited Edition Trunks in Camo Print Black colour, \
                      featuring THESE FEATURES. This item also sports THESE PROPERTIES.";
        assert_eq!(
            swap_clauses(c_text).unwrap(),
            "From Calvin Klein comes the Limited Edition Trunks in Camo Print Black colour, \
             featuring THESE PROPERTIES. This item also sports THESE FEATURES."
        );
    }

    #[test]
    fn test_trailing_newline_ends_the_text() {
        assert_eq!(
            extract_featuring_tail("The Hi from Converse comes in Teak colour, featuring A. It sports B.\n")
                .unwrap(),
            "featuring A. It sports B."
        );
        assert_eq!(
            swap_clauses("featuring A. It sports B.\n").unwrap(),
            "featuring B. It sports A.\n"
        );
        assert_eq!(
            swap_clauses("featuring A. It sports B.\n\n"),
            Err(ClauseError::Missing(EnumClause::Sports))
        );
    }

    #[test]
    fn test_swap_accepts_singular_sport() {
        assert_eq!(
            swap_clauses("featuring a hood. It will sport you well.").unwrap(),
            "featuring you well. It will sport a hood."
        );
    }

    #[test]
    fn test_missing_clauses() {
        assert_eq!(
            swap_clauses("featuring no period at all"),
            Err(ClauseError::Missing(EnumClause::Featuring))
        );
        assert_eq!(
            swap_clauses("featuring THESE FEATURES. Note: Blah blah."),
            Err(ClauseError::Missing(EnumClause::Sports))
        );
        assert_eq!(
            swap_clauses("featuring A. It sports B. Trailing text"),
            Err(ClauseError::Missing(EnumClause::Sports))
        );
    }

    #[test]
    fn test_empty_subclauses() {
        assert_eq!(
            swap_clauses("featuring . It sports B."),
            Err(ClauseError::Empty(EnumClause::Featuring))
        );
        assert_eq!(
            swap_clauses("featuring A. It sports ."),
            Err(ClauseError::Empty(EnumClause::Sports))
        );
    }

    #[test]
    fn test_overlapping_clauses_are_rejected() {
        assert_eq!(
            swap_clauses("featuring sports gear and more."),
            Err(ClauseError::Overlapping)
        );
    }

    #[test]
    fn test_rephrasing() {
        assert_eq!(
            rephrase_offers("From Converse comes the Hi in Teak colour, featuring X.", "Converse"),
            "Converse offers the Hi in Teak colour, featuring X."
        );
        assert_eq!(
            rephrase_offered_by("The Hi from Converse comes in Teak colour, featuring X.", "Converse", "Hi"),
            "Offered by Converse, the Hi comes in Teak colour, featuring X."
        );
        assert_eq!(replace_colour("Teak and Teak", "Teak", "Black"), "Black and Black");
        assert_eq!(replace_colour("Teak", "", "Black"), "Teak");
    }
}
