//! View models for the invite and RSVP pages.
//!
//! These decide what a page shows for a given guest: the greeting, the
//! invite-category suffix, the day vs. weekend variant, and which optional
//! form sections apply. Markup is rendered elsewhere.

use invite_core::{Attendance, Count, Flag, GuestFields, InviteCategory};
use serde::Serialize;

pub const NO_NAME: &str = "No Name";

/// Data behind `/invite/{id}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InviteView {
    pub id: String,
    pub greeting_name: String,
    pub invite_suffix: Option<&'static str>,
    pub weekender: bool,
    pub has_responded: bool,
    pub rsvp: Option<String>,
}

impl InviteView {
    pub fn new(id: &str, fields: &GuestFields) -> Self {
        Self {
            id: id.to_string(),
            greeting_name: fields
                .guest
                .as_deref()
                .filter(|name| !name.trim().is_empty())
                .unwrap_or(NO_NAME)
                .to_string(),
            invite_suffix: invite_suffix(fields.invite_size.as_ref()),
            weekender: fields.is_weekender(),
            has_responded: fields.has_responded(),
            rsvp: fields.rsvp.as_ref().map(ToString::to_string),
        }
    }
}

/// `& family` for family invites, `+ 1` for plus-ones, nothing otherwise.
pub fn invite_suffix(category: Option<&InviteCategory>) -> Option<&'static str> {
    match category? {
        InviteCategory::Family => Some("& family"),
        InviteCategory::PlusOne => Some("+ 1"),
        InviteCategory::Other(_) => None,
    }
}

/// Data behind `/invite/{id}/edit`: current answers plus the sections shown.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RsvpFormView {
    pub id: String,
    pub weekender: bool,
    /// Children questions only apply to family invites.
    pub show_children: bool,
    /// Camping and Saturday-only questions only apply to weekend guests.
    pub show_camping: bool,
    pub rsvp: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub dietary: Option<String>,
    pub notes: Option<String>,
    pub children: Option<&'static str>,
    pub num_children: Option<u32>,
    pub plan_on_camping: Option<&'static str>,
    pub only_day: Option<&'static str>,
    pub glamping: Option<&'static str>,
}

impl RsvpFormView {
    pub fn new(id: &str, fields: &GuestFields) -> Self {
        let weekender = fields.is_weekender();
        Self {
            id: id.to_string(),
            weekender,
            show_children: fields.invite_size == Some(InviteCategory::Family),
            show_camping: weekender,
            rsvp: fields.rsvp.as_ref().map(rsvp_radio_value),
            email: fields.email.clone(),
            phone: fields.phone.clone(),
            dietary: fields.dietary.clone(),
            notes: fields.notes.clone(),
            children: radio_value(fields.children.as_ref()),
            num_children: fields.num_children.as_ref().and_then(Count::value),
            plan_on_camping: radio_value(fields.plan_on_camping.as_ref()),
            only_day: radio_value(fields.only_day.as_ref()),
            glamping: radio_value(fields.glamping.as_ref()),
        }
    }
}

/// The attendance radio to check. Recognisable answers are normalised to
/// `yes`/`no`; anything else is passed through untouched.
fn rsvp_radio_value(rsvp: &Attendance) -> String {
    match rsvp.answer() {
        Some(true) => "yes".to_string(),
        Some(false) => "no".to_string(),
        None => rsvp.to_string(),
    }
}

/// Which yes/no radio starts checked; none when the guest never answered.
fn radio_value(flag: Option<&Flag>) -> Option<&'static str> {
    flag.map(|f| if f.is_true() { "yes" } else { "no" })
}
