//! Visit-order guards and navigational history.
//!
//! History is the ordered list of paths a visitor has successfully submitted,
//! oldest first. A path may appear more than once when the visitor loops back
//! through part of the form.

/// Determine whether a visitor is allowed to view a page.
///
/// `guard_allow_previous` lists pages of which the visitor must have
/// submitted *at least one*, not all of them. `None` or an empty list marks
/// an entry page that can be visited at any time.
pub fn guard_allows(previous_pages: &[String], guard_allow_previous: Option<&[String]>) -> bool {
    let required = match guard_allow_previous {
        None => return true,
        Some(required) if required.is_empty() => return true,
        Some(required) => required,
    };

    if previous_pages.is_empty() {
        return false;
    }

    required
        .iter()
        .any(|allowed| previous_pages.iter().any(|visited| visited == allowed))
}

/// The most recently submitted page, if any.
pub fn previous_page(previous_pages: &[String]) -> Option<&str> {
    previous_pages.last().map(String::as_str)
}

/// History after a backward step, plus where the back link should now point.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BackStep {
    pub history: Vec<String>,
    pub back_url: Option<String>,
}

/// Step backwards onto `path`.
///
/// Removes the single most recent occurrence of `path`; earlier visits stay.
/// History without `path` in it is returned unchanged.
///
/// The back link points at whatever the visitor submitted just before the
/// removed visit. When the removed visit was the newest entry (the usual case)
/// that is simply the new last entry of history.
pub fn step_back(previous_pages: &[String], path: &str) -> BackStep {
    let mut history = previous_pages.to_vec();
    let Some(index) = history.iter().rposition(|visited| visited == path) else {
        let back_url = history.last().cloned();
        return BackStep { history, back_url };
    };

    history.remove(index);
    let back_url = index
        .checked_sub(1)
        .and_then(|before| history.get(before))
        .cloned();
    BackStep { history, back_url }
}
