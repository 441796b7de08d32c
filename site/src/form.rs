//! Form submissions and the partial updates they turn into.

use invite_core::{Attendance, Count, Flag, GuestFields};
use serde::Deserialize;

/// Body of `POST /invite/{id}/edit`. Every input is optional because the
/// family and weekend sections are not always on the page.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RsvpSubmission {
    pub rsvp: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub dietary: Option<String>,
    pub notes: Option<String>,
    pub children: Option<String>,
    pub num_children: Option<String>,
    pub plan_on_camping: Option<String>,
    pub only_day: Option<String>,
    pub glamping: Option<String>,
}

impl RsvpSubmission {
    /// Inputs absent from the body are left untouched. Inputs submitted blank
    /// clear the stored value. Submitting the form always marks the guest as
    /// having responded.
    pub fn into_update(self) -> GuestFields {
        let mut update = GuestFields {
            has_responded: Some(Flag::Bool(true)),
            ..Default::default()
        };
        update.rsvp = filled(&mut update, "rsvp", self.rsvp).map(Attendance::from);
        update.email = filled(&mut update, "email", self.email);
        update.phone = filled(&mut update, "phone", self.phone);
        update.dietary = filled(&mut update, "dietary", self.dietary);
        update.notes = filled(&mut update, "notes", self.notes);
        update.children = filled(&mut update, "children", self.children).map(Flag::Text);
        update.num_children =
            filled(&mut update, "numChildren", self.num_children).map(|n| match n.trim().parse() {
                Ok(count) => Count::Number(count),
                Err(_) => Count::Text(n),
            });
        update.plan_on_camping =
            filled(&mut update, "planOnCamping", self.plan_on_camping).map(Flag::Text);
        update.only_day = filled(&mut update, "onlyDay", self.only_day).map(Flag::Text);
        update.glamping = filled(&mut update, "glamping", self.glamping).map(Flag::Text);
        update
    }
}

/// Body of `POST /invite/{id}`.
#[derive(Debug, Default, Deserialize)]
pub struct FavoriteSubmission {
    pub favorite: Option<String>,
}

impl FavoriteSubmission {
    pub fn into_update(self) -> GuestFields {
        GuestFields {
            favorite: Some(Flag::Bool(self.favorite.as_deref() == Some("true"))),
            ..Default::default()
        }
    }
}

/// The submitted text, or `None` after marking `column` cleared when the
/// input came back blank.
fn filled(update: &mut GuestFields, column: &str, value: Option<String>) -> Option<String> {
    match value {
        Some(v) if v.trim().is_empty() => {
            update.clear(column);
            None
        }
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn submission_sets_has_responded() {
        let update = RsvpSubmission::default().into_update();
        assert_eq!(serde_json::to_value(&update).unwrap(), json!({ "hasResponded": true }));
    }

    #[test]
    fn blank_inputs_clear_and_absent_inputs_are_omitted() {
        let update = RsvpSubmission {
            rsvp: Some("yes".into()),
            email: Some("".into()),
            dietary: Some("   ".into()),
            num_children: Some("".into()),
            notes: Some("Vegetarian plus one".into()),
            ..Default::default()
        }
        .into_update();
        assert_eq!(
            serde_json::to_value(&update).unwrap(),
            json!({
                "rsvp": "yes",
                "email": null,
                "dietary": null,
                "numChildren": null,
                "notes": "Vegetarian plus one",
                "hasResponded": true
            })
        );
    }

    #[test]
    fn child_count_becomes_a_number() {
        let update = RsvpSubmission {
            children: Some("yes".into()),
            num_children: Some("2".into()),
            ..Default::default()
        }
        .into_update();
        assert_eq!(update.children, Some(Flag::Text("yes".into())));
        assert_eq!(update.num_children, Some(Count::Number(2)));
    }

    #[test]
    fn favorite_is_true_only_for_literal_true() {
        let on = FavoriteSubmission { favorite: Some("true".into()) }.into_update();
        assert_eq!(on.favorite, Some(Flag::Bool(true)));
        let off = FavoriteSubmission { favorite: Some("false".into()) }.into_update();
        assert_eq!(off.favorite, Some(Flag::Bool(false)));
        let missing = FavoriteSubmission::default().into_update();
        assert_eq!(missing.favorite, Some(Flag::Bool(false)));
    }
}
