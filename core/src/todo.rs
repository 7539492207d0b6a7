// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! The to-do record model.
//!
//! A [`TodoItem`] holds the canonical in-memory state of a task, project or
//! heading. Every mutating method validates its precondition first, applies
//! the change, and stamps `modification_date` from the injected clock; what
//! actually goes on the wire is derived later by diffing against the last
//! synced snapshot, so no change list is kept here.

use std::fmt;
use std::str::FromStr;

use jiff::Timestamp;
use jiff::civil::Time;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::clock::Clock;
use crate::error::TransitionError;
use crate::record_id::RecordId;

/// The kind of a record.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum RecordType {
    /// A plain to-do task.
    #[default]
    Task,
    /// A project grouping tasks.
    Project,
    /// A heading within a project.
    Heading,
}

impl RecordType {
    const TASK: &str = "task";
    const PROJECT: &str = "project";
    const HEADING: &str = "heading";
}

impl AsRef<str> for RecordType {
    fn as_ref(&self) -> &str {
        match self {
            Self::Task => Self::TASK,
            Self::Project => Self::PROJECT,
            Self::Heading => Self::HEADING,
        }
    }
}

impl fmt::Display for RecordType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_ref())
    }
}

impl From<RecordType> for u8 {
    fn from(value: RecordType) -> Self {
        match value {
            RecordType::Task => 0,
            RecordType::Project => 1,
            RecordType::Heading => 2,
        }
    }
}

impl TryFrom<u8> for RecordType {
    type Error = u8;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Self::Task),
            1 => Ok(Self::Project),
            2 => Ok(Self::Heading),
            other => Err(other),
        }
    }
}

/// The status of a record.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    /// Still to be done.
    #[default]
    Todo,
    /// Cancelled without being done.
    Cancelled,
    /// Done.
    Complete,
}

impl Status {
    const TODO: &str = "todo";
    const CANCELLED: &str = "cancelled";
    const COMPLETE: &str = "complete";
}

impl AsRef<str> for Status {
    fn as_ref(&self) -> &str {
        match self {
            Self::Todo => Self::TODO,
            Self::Cancelled => Self::CANCELLED,
            Self::Complete => Self::COMPLETE,
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_ref())
    }
}

impl FromStr for Status {
    type Err = ();

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            Self::TODO => Ok(Self::Todo),
            Self::CANCELLED => Ok(Self::Cancelled),
            Self::COMPLETE => Ok(Self::Complete),
            _ => Err(()),
        }
    }
}

impl From<Status> for u8 {
    fn from(value: Status) -> Self {
        match value {
            Status::Todo => 0,
            Status::Cancelled => 2,
            Status::Complete => 3,
        }
    }
}

impl TryFrom<u8> for Status {
    type Error = u8;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Self::Todo),
            2 => Ok(Self::Cancelled),
            3 => Ok(Self::Complete),
            other => Err(other),
        }
    }
}

/// The stored list a record lives in.
///
/// `Anytime` subsumes the Today and Evening views, which are derived from the
/// scheduled date rather than stored as their own destination values.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum Destination {
    /// The inbox.
    #[default]
    Inbox,
    /// The anytime list; also the backing list of Today and Evening.
    Anytime,
    /// The someday list.
    Someday,
}

impl Destination {
    const INBOX: &str = "inbox";
    const ANYTIME: &str = "anytime";
    const SOMEDAY: &str = "someday";
}

impl AsRef<str> for Destination {
    fn as_ref(&self) -> &str {
        match self {
            Self::Inbox => Self::INBOX,
            Self::Anytime => Self::ANYTIME,
            Self::Someday => Self::SOMEDAY,
        }
    }
}

impl fmt::Display for Destination {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_ref())
    }
}

impl From<Destination> for u8 {
    fn from(value: Destination) -> Self {
        match value {
            Destination::Inbox => 0,
            Destination::Anytime => 1,
            Destination::Someday => 2,
        }
    }
}

impl TryFrom<u8> for Destination {
    type Error = u8;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Self::Inbox),
            1 => Ok(Self::Anytime),
            2 => Ok(Self::Someday),
            other => Err(other),
        }
    }
}

/// Structured note attached to a record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Note {
    /// Type tag; `"tx"` for plain text notes.
    #[serde(rename = "_t", default = "Note::default_type_tag")]
    pub type_tag: String,

    /// Change counter, bumped by clients that edit the note.
    #[serde(rename = "ch", default)]
    pub change_counter: i64,

    /// The note text.
    #[serde(rename = "v", default)]
    pub value: String,

    /// Opaque trailing tag, preserved verbatim.
    #[serde(rename = "t", default)]
    pub t: i64,
}

impl Note {
    fn default_type_tag() -> String {
        "tx".to_string()
    }
}

impl Default for Note {
    fn default() -> Self {
        Self {
            type_tag: Self::default_type_tag(),
            change_counter: 0,
            value: String::new(),
            t: 0,
        }
    }
}

/// One task, project or heading.
///
/// Mutations go through the setter methods and verbs below; each one
/// validates, then mutates, then stamps `modification_date`. Records are
/// never removed locally through this type; trashing is a soft-delete field,
/// and only a server-reported delete drops a record from the item table.
#[derive(Debug, Clone)]
pub struct TodoItem {
    pub(crate) id: RecordId,
    pub(crate) order_index: i64,
    pub(crate) title: String,
    pub(crate) record_type: RecordType,
    pub(crate) status: Status,
    pub(crate) destination: Destination,
    pub(crate) creation_date: Timestamp,
    pub(crate) modification_date: Timestamp,
    pub(crate) scheduled_date: Option<Timestamp>,
    pub(crate) today_index_reference_date: Option<Timestamp>,
    pub(crate) completion_date: Option<Timestamp>,
    pub(crate) due_date: Option<Timestamp>,
    pub(crate) trashed: bool,
    pub(crate) instance_creation_paused: bool,
    pub(crate) project: Option<RecordId>,
    pub(crate) area: Option<String>,
    pub(crate) evening: bool,
    pub(crate) tags: Vec<Value>,
    pub(crate) due_date_suppression_date: Option<Timestamp>,
    pub(crate) repeating_template: Vec<String>,
    pub(crate) repeater_migration_date: Value,
    pub(crate) delegate: Vec<Value>,
    pub(crate) due_date_offset: i64,
    pub(crate) last_alarm_interaction_date: Option<Timestamp>,
    pub(crate) action_group: Vec<String>,
    pub(crate) leaves_tombstone: bool,
    pub(crate) instance_creation_count: i64,
    pub(crate) today_index: i64,
    pub(crate) reminder: Option<Time>,
    pub(crate) instance_creation_start_date: Option<Timestamp>,
    pub(crate) repeater: Value,
    pub(crate) after_completion_reference_date: Option<Timestamp>,
    pub(crate) recurrence_rule: Option<String>,
    pub(crate) note: Note,
    pub(crate) clock: Clock,
}

impl TodoItem {
    /// Creates a fresh record with a generated id and default field values:
    /// a task, in the inbox, with todo status, stamped "now".
    #[must_use]
    pub fn new(clock: Clock) -> Self {
        Self::with_id(RecordId::generate(), clock)
    }

    /// Creates a record with the given id (used when decoding server
    /// snapshots, whose ids come from the wire).
    #[must_use]
    pub fn with_id(id: RecordId, clock: Clock) -> Self {
        let now = clock.now();
        Self {
            id,
            order_index: 0,
            title: String::new(),
            record_type: RecordType::Task,
            status: Status::Todo,
            destination: Destination::Inbox,
            creation_date: now,
            modification_date: now,
            scheduled_date: None,
            today_index_reference_date: None,
            completion_date: None,
            due_date: None,
            trashed: false,
            instance_creation_paused: false,
            project: None,
            area: None,
            evening: false,
            tags: Vec::new(),
            due_date_suppression_date: None,
            repeating_template: Vec::new(),
            repeater_migration_date: Value::Null,
            delegate: Vec::new(),
            due_date_offset: 0,
            last_alarm_interaction_date: None,
            action_group: Vec::new(),
            leaves_tombstone: false,
            instance_creation_count: 0,
            today_index: 0,
            reminder: None,
            instance_creation_start_date: None,
            repeater: Value::Null,
            after_completion_reference_date: None,
            recurrence_rule: None,
            note: Note::default(),
            clock,
        }
    }

    /// The record identifier.
    #[must_use]
    pub fn id(&self) -> &RecordId {
        &self.id
    }

    /// Position among siblings, assigned by the server on create.
    #[must_use]
    pub fn order_index(&self) -> i64 {
        self.order_index
    }

    /// The title.
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// The record kind.
    #[must_use]
    pub fn record_type(&self) -> RecordType {
        self.record_type
    }

    /// The status.
    #[must_use]
    pub fn status(&self) -> Status {
        self.status
    }

    /// The stored destination list.
    #[must_use]
    pub fn destination(&self) -> Destination {
        self.destination
    }

    /// Creation timestamp.
    #[must_use]
    pub fn creation_date(&self) -> Timestamp {
        self.creation_date
    }

    /// Timestamp of the last field mutation.
    #[must_use]
    pub fn modification_date(&self) -> Timestamp {
        self.modification_date
    }

    /// The scheduled date, if any.
    #[must_use]
    pub fn scheduled_date(&self) -> Option<Timestamp> {
        self.scheduled_date
    }

    /// When the record transitioned into complete or cancelled.
    #[must_use]
    pub fn completion_date(&self) -> Option<Timestamp> {
        self.completion_date
    }

    /// The due date, if any.
    #[must_use]
    pub fn due_date(&self) -> Option<Timestamp> {
        self.due_date
    }

    /// Whether the record is in the trash.
    #[must_use]
    pub fn trashed(&self) -> bool {
        self.trashed
    }

    /// Whether recurring-instance creation is paused.
    #[must_use]
    pub fn instance_creation_paused(&self) -> bool {
        self.instance_creation_paused
    }

    /// The assigned project, if any.
    #[must_use]
    pub fn project(&self) -> Option<&RecordId> {
        self.project.as_ref()
    }

    /// The assigned area, if any.
    #[must_use]
    pub fn area(&self) -> Option<&str> {
        self.area.as_deref()
    }

    /// The reminder time of day, if any.
    #[must_use]
    pub fn reminder(&self) -> Option<Time> {
        self.reminder
    }

    /// The attached note.
    #[must_use]
    pub fn note(&self) -> &Note {
        &self.note
    }

    /// Whether the record shows up in the Today view: it lives in the
    /// anytime list and is scheduled for today.
    #[must_use]
    pub fn is_today(&self) -> bool {
        self.destination == Destination::Anytime && self.scheduled_date == Some(self.clock.today())
    }

    /// Whether the record shows up in the Evening section of Today.
    #[must_use]
    pub fn is_evening(&self) -> bool {
        self.is_today() && self.evening
    }

    fn touch(&mut self) {
        self.modification_date = self.clock.now();
    }

    /// Sets the title.
    pub fn set_title(&mut self, title: impl Into<String>) {
        self.title = title.into();
        self.touch();
    }

    /// Sets the note text.
    pub fn set_note(&mut self, text: impl Into<String>) {
        self.note.value = text.into();
        self.note.change_counter += 1;
        self.touch();
    }

    /// Moves the record to another destination list.
    ///
    /// # Errors
    ///
    /// Only a task may be moved this way; projects and headings are rejected.
    pub fn set_destination(&mut self, destination: Destination) -> Result<(), TransitionError> {
        if self.record_type != RecordType::Task {
            return Err(TransitionError::NotATask(self.record_type));
        }
        self.destination = destination;
        self.touch();
        Ok(())
    }

    /// Assigns the record to a project, or clears the assignment.
    ///
    /// Projects and areas are mutually exclusive: assigning a project clears
    /// the area. Assigning a project to an inbox record moves it to anytime.
    ///
    /// # Errors
    ///
    /// A record cannot be its own project.
    pub fn set_project_id(&mut self, project: Option<RecordId>) -> Result<(), TransitionError> {
        match project {
            None => self.project = None,
            Some(id) => {
                if id == self.id {
                    return Err(TransitionError::SelfAsProject);
                }
                self.project = Some(id);
                self.area = None;
                if self.destination == Destination::Inbox {
                    self.destination = Destination::Anytime;
                }
            }
        }
        self.touch();
        Ok(())
    }

    /// Assigns the record to the given project record.
    ///
    /// # Errors
    ///
    /// The argument must be a project, and a record cannot be its own
    /// project.
    pub fn assign_project(&mut self, project: &TodoItem) -> Result<(), TransitionError> {
        if project.record_type != RecordType::Project {
            return Err(TransitionError::NotAProject);
        }
        self.set_project_id(Some(project.id.clone()))
    }

    /// Assigns the record to an area, or clears the assignment.
    ///
    /// Projects and areas are mutually exclusive: assigning an area clears
    /// the project. Assigning an area to an inbox record moves it to anytime.
    pub fn set_area(&mut self, area: Option<String>) {
        match area {
            None => self.area = None,
            Some(area) => {
                self.area = Some(area);
                self.project = None;
                if self.destination == Destination::Inbox {
                    self.destination = Destination::Anytime;
                }
            }
        }
        self.touch();
    }

    /// Transitions into the given status.
    ///
    /// Completing or cancelling stamps `completion_date`; returning to todo
    /// clears it.
    ///
    /// # Errors
    ///
    /// Transitioning into the status the record already holds is rejected.
    pub fn set_status(&mut self, status: Status) -> Result<(), TransitionError> {
        if self.status == status {
            return Err(TransitionError::StatusUnchanged(status));
        }
        self.status = status;
        self.completion_date = match status {
            Status::Todo => None,
            Status::Complete | Status::Cancelled => Some(self.clock.now()),
        };
        self.touch();
        Ok(())
    }

    /// Marks the record as still to be done.
    ///
    /// # Errors
    ///
    /// Rejected if the record already has todo status.
    pub fn todo(&mut self) -> Result<(), TransitionError> {
        self.set_status(Status::Todo)
    }

    /// Marks the record as done.
    ///
    /// # Errors
    ///
    /// Rejected if the record is already complete.
    pub fn complete(&mut self) -> Result<(), TransitionError> {
        self.set_status(Status::Complete)
    }

    /// Cancels the record.
    ///
    /// # Errors
    ///
    /// Rejected if the record is already cancelled.
    pub fn cancel(&mut self) -> Result<(), TransitionError> {
        self.set_status(Status::Cancelled)
    }

    /// Moves the record to the trash.
    ///
    /// # Errors
    ///
    /// Rejected if the record is already in the trash.
    pub fn delete(&mut self) -> Result<(), TransitionError> {
        if self.trashed {
            return Err(TransitionError::AlreadyTrashed);
        }
        self.trashed = true;
        self.touch();
        Ok(())
    }

    /// Restores the record from the trash.
    ///
    /// # Errors
    ///
    /// Rejected if the record is not in the trash.
    pub fn restore(&mut self) -> Result<(), TransitionError> {
        if !self.trashed {
            return Err(TransitionError::NotTrashed);
        }
        self.trashed = false;
        self.touch();
        Ok(())
    }

    /// Converts the task into a project. One-way.
    ///
    /// Pauses recurring-instance creation and moves the record out of the
    /// inbox.
    ///
    /// # Errors
    ///
    /// Rejected if the record is not currently a task.
    pub fn as_project(&mut self) -> Result<(), TransitionError> {
        if self.record_type != RecordType::Task {
            return Err(TransitionError::NotATask(self.record_type));
        }
        self.record_type = RecordType::Project;
        self.instance_creation_paused = true;
        if self.destination == Destination::Inbox {
            self.destination = Destination::Anytime;
        }
        self.touch();
        Ok(())
    }

    /// Sets the scheduled date. Always mirrored into the today-index
    /// reference date.
    pub fn set_scheduled_date(&mut self, scheduled: Option<Timestamp>) {
        self.scheduled_date = scheduled;
        self.today_index_reference_date = scheduled;
        self.touch();
    }

    /// Sets the due date.
    pub fn set_due_date(&mut self, due: Option<Timestamp>) {
        self.due_date = due;
        self.touch();
    }

    /// Sets the reminder time of day.
    pub fn set_reminder(&mut self, reminder: Option<Time>) {
        self.reminder = reminder;
        self.touch();
    }

    /// Moves the record into the Today view: anytime, scheduled for local
    /// midnight of the current day.
    pub fn today(&mut self) {
        let today = self.clock.today();
        self.destination = Destination::Anytime;
        self.set_scheduled_date(Some(today));
    }

    /// Moves the record into the Evening section of Today.
    pub fn evening(&mut self) {
        self.today();
        self.evening = true;
        self.touch();
    }
}
