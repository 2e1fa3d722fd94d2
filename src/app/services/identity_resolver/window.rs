//! Cumulative birth-date windows over a racer's race history

use crate::Result;
use crate::app::models::BirthDateWindow;
use crate::app::services::age_categories;
use chrono::NaiveDate;

/// Birth-date window implied by racing in `label` on `race_date`
pub fn for_category(race_date: NaiveDate, label: &str) -> Result<BirthDateWindow> {
    age_categories::birth_window(race_date, label)
}

/// Fold a (race date, category) history into one window
///
/// Takes the latest lower bound and the earliest upper bound. The result may be
/// contradictory when the history disagrees with itself; callers decide what
/// that means. An empty history yields `None`.
pub fn fold(history: &[(NaiveDate, String)]) -> Result<Option<BirthDateWindow>> {
    let mut cumulative: Option<BirthDateWindow> = None;

    for (race_date, label) in history {
        let window = for_category(*race_date, label)?;
        cumulative = Some(match cumulative {
            Some(current) => current.narrow(&window),
            None => window,
        });
    }

    Ok(cumulative)
}
