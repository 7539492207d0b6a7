// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Bidirectional mapping between [`TodoItem`] and the wire's short-key JSON
//! object.
//!
//! Day-granularity timestamps (`sr`, `tir`, `dd`) travel as integer epoch
//! seconds; the remaining timestamps travel as fractional epoch seconds with
//! millisecond precision. The evening flag travels as 0/1, the reminder as
//! seconds since midnight. Decoding tolerates unknown and absent keys, but a
//! malformed value rejects the whole record.

use std::fmt;
use std::str::FromStr;

use jiff::Timestamp;
use jiff::civil::Time;
use serde_json::Value;

use crate::clock::Clock;
use crate::error::Error;
use crate::record_id::RecordId;
use crate::snapshot::Snapshot;
use crate::todo::{Destination, Note, RecordType, Status, TodoItem};

/// A semantic record field and its wire alias.
///
/// This is the static alias table: every field the protocol knows, paired
/// with the short key it uses on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    /// `ix`: position among siblings.
    OrderIndex,
    /// `tt`: title.
    Title,
    /// `ss`: status.
    Status,
    /// `st`: destination list.
    Destination,
    /// `cd`: creation timestamp.
    CreationDate,
    /// `md`: last modification timestamp.
    ModificationDate,
    /// `sr`: scheduled date.
    ScheduledDate,
    /// `tir`: mirror of the scheduled date for today-index bookkeeping.
    TodayIndexReferenceDate,
    /// `sp`: completion timestamp.
    CompletionDate,
    /// `dd`: due date.
    DueDate,
    /// `tr`: trashed flag.
    Trashed,
    /// `icp`: instance-creation-paused flag.
    InstanceCreationPaused,
    /// `pr`: project id list (at most one).
    Projects,
    /// `ar`: area id list (at most one).
    Areas,
    /// `sb`: evening flag, 0/1 on the wire.
    Evening,
    /// `tg`: tags, passed through verbatim.
    Tags,
    /// `tp`: record kind.
    RecordType,
    /// `dds`: due-date suppression timestamp.
    DueDateSuppressionDate,
    /// `rt`: repeating template ids.
    RepeatingTemplate,
    /// `rmd`: repeater migration date, passed through verbatim.
    RepeaterMigrationDate,
    /// `dl`: delegate entries, passed through verbatim.
    Delegate,
    /// `do`: due-date offset in days.
    DueDateOffset,
    /// `lai`: last alarm interaction timestamp.
    LastAlarmInteractionDate,
    /// `agr`: action group ids.
    ActionGroup,
    /// `lt`: leaves-tombstone flag.
    LeavesTombstone,
    /// `icc`: instance creation counter.
    InstanceCreationCount,
    /// `ti`: today-list position.
    TodayIndex,
    /// `ato`: reminder, seconds since midnight on the wire.
    Reminder,
    /// `icsd`: instance creation start timestamp.
    InstanceCreationStartDate,
    /// `rp`: repeater, passed through verbatim.
    Repeater,
    /// `acrd`: after-completion reference timestamp.
    AfterCompletionReferenceDate,
    /// `rr`: recurrence rule.
    RecurrenceRule,
    /// `nt`: structured note.
    Note,
}

impl Field {
    /// Every field, in canonical encoding order.
    pub const ALL: [Self; 33] = [
        Self::OrderIndex,
        Self::Title,
        Self::Status,
        Self::Destination,
        Self::CreationDate,
        Self::ModificationDate,
        Self::ScheduledDate,
        Self::TodayIndexReferenceDate,
        Self::CompletionDate,
        Self::DueDate,
        Self::Trashed,
        Self::InstanceCreationPaused,
        Self::Projects,
        Self::Areas,
        Self::Evening,
        Self::Tags,
        Self::RecordType,
        Self::DueDateSuppressionDate,
        Self::RepeatingTemplate,
        Self::RepeaterMigrationDate,
        Self::Delegate,
        Self::DueDateOffset,
        Self::LastAlarmInteractionDate,
        Self::ActionGroup,
        Self::LeavesTombstone,
        Self::InstanceCreationCount,
        Self::TodayIndex,
        Self::Reminder,
        Self::InstanceCreationStartDate,
        Self::Repeater,
        Self::AfterCompletionReferenceDate,
        Self::RecurrenceRule,
        Self::Note,
    ];

    /// The short key this field uses on the wire.
    #[must_use]
    pub const fn wire_key(self) -> &'static str {
        match self {
            Self::OrderIndex => "ix",
            Self::Title => "tt",
            Self::Status => "ss",
            Self::Destination => "st",
            Self::CreationDate => "cd",
            Self::ModificationDate => "md",
            Self::ScheduledDate => "sr",
            Self::TodayIndexReferenceDate => "tir",
            Self::CompletionDate => "sp",
            Self::DueDate => "dd",
            Self::Trashed => "tr",
            Self::InstanceCreationPaused => "icp",
            Self::Projects => "pr",
            Self::Areas => "ar",
            Self::Evening => "sb",
            Self::Tags => "tg",
            Self::RecordType => "tp",
            Self::DueDateSuppressionDate => "dds",
            Self::RepeatingTemplate => "rt",
            Self::RepeaterMigrationDate => "rmd",
            Self::Delegate => "dl",
            Self::DueDateOffset => "do",
            Self::LastAlarmInteractionDate => "lai",
            Self::ActionGroup => "agr",
            Self::LeavesTombstone => "lt",
            Self::InstanceCreationCount => "icc",
            Self::TodayIndex => "ti",
            Self::Reminder => "ato",
            Self::InstanceCreationStartDate => "icsd",
            Self::Repeater => "rp",
            Self::AfterCompletionReferenceDate => "acrd",
            Self::RecurrenceRule => "rr",
            Self::Note => "nt",
        }
    }

    /// Looks a field up by its wire key.
    #[must_use]
    pub fn from_wire_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|f| f.wire_key() == key)
    }
}

impl AsRef<str> for Field {
    fn as_ref(&self) -> &str {
        self.wire_key()
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.wire_key())
    }
}

impl FromStr for Field {
    type Err = ();

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Self::from_wire_key(value).ok_or(())
    }
}

/// Encodes every field of a record into a full wire snapshot.
#[must_use]
pub fn encode_full(todo: &TodoItem) -> Snapshot {
    Field::ALL
        .into_iter()
        .map(|field| (field.wire_key().to_string(), encode_field(todo, field)))
        .collect()
}

/// Decodes a full snapshot into a record with the given id.
///
/// Absent fields keep their default values; unknown keys are ignored for
/// forward compatibility.
///
/// # Errors
///
/// A malformed field value rejects the whole record with
/// [`Error::Protocol`].
pub fn decode(id: RecordId, payload: &Snapshot, clock: Clock) -> Result<TodoItem, Error> {
    let mut todo = TodoItem::with_id(id, clock);
    apply_payload(&mut todo, payload)?;
    Ok(todo)
}

/// Applies the fields present in `payload` directly onto the record's
/// storage.
///
/// This is the entry point for *incoming* server data: it bypasses the
/// setters, so no preconditions run and `modification_date` is only changed
/// if the payload carries `md` itself. Absent keys leave the target field
/// untouched; a present null clears it.
pub(crate) fn apply_payload(todo: &mut TodoItem, payload: &Snapshot) -> Result<(), Error> {
    for (key, value) in payload.iter() {
        let Some(field) = Field::from_wire_key(key) else {
            tracing::debug!(%key, "ignoring unknown wire field");
            continue;
        };
        apply_field(todo, field, value).map_err(|e| Error::Protocol(format!("field {key}: {e}")))?;
    }
    Ok(())
}

fn encode_field(todo: &TodoItem, field: Field) -> Value {
    match field {
        Field::OrderIndex => todo.order_index.into(),
        Field::Title => todo.title.clone().into(),
        Field::Status => u8::from(todo.status).into(),
        Field::Destination => u8::from(todo.destination).into(),
        Field::CreationDate => encode_timestamp_precise(todo.creation_date),
        Field::ModificationDate => encode_timestamp_precise(todo.modification_date),
        Field::ScheduledDate => encode_opt_timestamp_rounded(todo.scheduled_date),
        Field::TodayIndexReferenceDate => {
            encode_opt_timestamp_rounded(todo.today_index_reference_date)
        }
        Field::CompletionDate => encode_opt_timestamp_precise(todo.completion_date),
        Field::DueDate => encode_opt_timestamp_rounded(todo.due_date),
        Field::Trashed => todo.trashed.into(),
        Field::InstanceCreationPaused => todo.instance_creation_paused.into(),
        Field::Projects => encode_id_list(todo.project.as_ref()),
        Field::Areas => todo
            .area
            .iter()
            .map(|a| Value::from(a.clone()))
            .collect::<Vec<_>>()
            .into(),
        Field::Evening => u8::from(todo.evening).into(),
        Field::Tags => todo.tags.clone().into(),
        Field::RecordType => u8::from(todo.record_type).into(),
        Field::DueDateSuppressionDate => encode_opt_timestamp_precise(todo.due_date_suppression_date),
        Field::RepeatingTemplate => encode_string_list(&todo.repeating_template),
        Field::RepeaterMigrationDate => todo.repeater_migration_date.clone(),
        Field::Delegate => todo.delegate.clone().into(),
        Field::DueDateOffset => todo.due_date_offset.into(),
        Field::LastAlarmInteractionDate => {
            encode_opt_timestamp_precise(todo.last_alarm_interaction_date)
        }
        Field::ActionGroup => encode_string_list(&todo.action_group),
        Field::LeavesTombstone => todo.leaves_tombstone.into(),
        Field::InstanceCreationCount => todo.instance_creation_count.into(),
        Field::TodayIndex => todo.today_index.into(),
        Field::Reminder => match todo.reminder {
            Some(time) => seconds_since_midnight(time).into(),
            None => Value::Null,
        },
        Field::InstanceCreationStartDate => {
            encode_opt_timestamp_precise(todo.instance_creation_start_date)
        }
        Field::Repeater => todo.repeater.clone(),
        Field::AfterCompletionReferenceDate => {
            encode_opt_timestamp_precise(todo.after_completion_reference_date)
        }
        Field::RecurrenceRule => match &todo.recurrence_rule {
            Some(rule) => rule.clone().into(),
            None => Value::Null,
        },
        Field::Note => serde_json::to_value(&todo.note).unwrap_or(Value::Null),
    }
}

fn apply_field(todo: &mut TodoItem, field: Field, value: &Value) -> Result<(), String> {
    match field {
        Field::OrderIndex => todo.order_index = parse_i64(value)?,
        Field::Title => todo.title = parse_string(value)?,
        Field::Status => {
            todo.status = Status::try_from(parse_u8(value)?)
                .map_err(|v| format!("unknown status code {v}"))?;
        }
        Field::Destination => {
            todo.destination = Destination::try_from(parse_u8(value)?)
                .map_err(|v| format!("unknown destination code {v}"))?;
        }
        Field::CreationDate => {
            todo.creation_date = parse_timestamp(value)?.ok_or("must not be null")?;
        }
        Field::ModificationDate => {
            todo.modification_date = parse_timestamp(value)?.ok_or("must not be null")?;
        }
        Field::ScheduledDate => todo.scheduled_date = parse_timestamp(value)?,
        Field::TodayIndexReferenceDate => todo.today_index_reference_date = parse_timestamp(value)?,
        Field::CompletionDate => todo.completion_date = parse_timestamp(value)?,
        Field::DueDate => todo.due_date = parse_timestamp(value)?,
        Field::Trashed => todo.trashed = parse_bool(value)?,
        Field::InstanceCreationPaused => todo.instance_creation_paused = parse_bool(value)?,
        Field::Projects => todo.project = parse_id_list(value)?,
        Field::Areas => todo.area = parse_string_list(value)?.into_iter().next(),
        Field::Evening => todo.evening = parse_bool(value)?,
        Field::Tags => todo.tags = parse_array(value)?,
        Field::RecordType => {
            todo.record_type = RecordType::try_from(parse_u8(value)?)
                .map_err(|v| format!("unknown record type code {v}"))?;
        }
        Field::DueDateSuppressionDate => todo.due_date_suppression_date = parse_timestamp(value)?,
        Field::RepeatingTemplate => todo.repeating_template = parse_string_list(value)?,
        Field::RepeaterMigrationDate => todo.repeater_migration_date = value.clone(),
        Field::Delegate => todo.delegate = parse_array(value)?,
        Field::DueDateOffset => todo.due_date_offset = parse_i64(value)?,
        Field::LastAlarmInteractionDate => {
            todo.last_alarm_interaction_date = parse_timestamp(value)?;
        }
        Field::ActionGroup => todo.action_group = parse_string_list(value)?,
        Field::LeavesTombstone => todo.leaves_tombstone = parse_bool(value)?,
        Field::InstanceCreationCount => todo.instance_creation_count = parse_i64(value)?,
        Field::TodayIndex => todo.today_index = parse_i64(value)?,
        Field::Reminder => todo.reminder = parse_time_of_day(value)?,
        Field::InstanceCreationStartDate => {
            todo.instance_creation_start_date = parse_timestamp(value)?;
        }
        Field::Repeater => todo.repeater = value.clone(),
        Field::AfterCompletionReferenceDate => {
            todo.after_completion_reference_date = parse_timestamp(value)?;
        }
        Field::RecurrenceRule => {
            todo.recurrence_rule = match value {
                Value::Null => None,
                other => Some(parse_string(other)?),
            };
        }
        Field::Note => {
            todo.note =
                serde_json::from_value::<Note>(value.clone()).map_err(|e| e.to_string())?;
        }
    }
    Ok(())
}

fn encode_timestamp_precise(ts: Timestamp) -> Value {
    #[allow(clippy::cast_precision_loss)] // epoch milliseconds fit f64 exactly
    let seconds = ts.as_millisecond() as f64 / 1000.0;
    serde_json::Number::from_f64(seconds).map_or(Value::Null, Value::Number)
}

fn encode_opt_timestamp_precise(ts: Option<Timestamp>) -> Value {
    ts.map_or(Value::Null, encode_timestamp_precise)
}

fn encode_opt_timestamp_rounded(ts: Option<Timestamp>) -> Value {
    ts.map_or(Value::Null, |ts| ts.as_second().into())
}

fn encode_id_list(id: Option<&RecordId>) -> Value {
    id.iter()
        .map(|id| Value::from(id.as_str()))
        .collect::<Vec<_>>()
        .into()
}

fn encode_string_list(list: &[String]) -> Value {
    list.iter()
        .map(|s| Value::from(s.clone()))
        .collect::<Vec<_>>()
        .into()
}

fn seconds_since_midnight(time: Time) -> i64 {
    (i64::from(time.hour()) * 60 + i64::from(time.minute())) * 60 + i64::from(time.second())
}

fn parse_i64(value: &Value) -> Result<i64, String> {
    value
        .as_i64()
        .ok_or_else(|| format!("expected integer, got {value}"))
}

fn parse_u8(value: &Value) -> Result<u8, String> {
    let n = parse_i64(value)?;
    u8::try_from(n).map_err(|_| format!("value {n} out of range"))
}

fn parse_string(value: &Value) -> Result<String, String> {
    value
        .as_str()
        .map(ToString::to_string)
        .ok_or_else(|| format!("expected string, got {value}"))
}

/// Accepts both JSON booleans and the wire's 0/1 integer encoding.
fn parse_bool(value: &Value) -> Result<bool, String> {
    match value {
        Value::Bool(b) => Ok(*b),
        Value::Number(_) => match parse_i64(value)? {
            0 => Ok(false),
            1 => Ok(true),
            other => Err(format!("expected 0 or 1, got {other}")),
        },
        other => Err(format!("expected boolean, got {other}")),
    }
}

/// Accepts null, integer epoch seconds, or fractional epoch seconds.
fn parse_timestamp(value: &Value) -> Result<Option<Timestamp>, String> {
    match value {
        Value::Null => Ok(None),
        Value::Number(n) => {
            let ts = if let Some(seconds) = n.as_i64() {
                Timestamp::from_second(seconds)
            } else if let Some(seconds) = n.as_f64() {
                #[allow(clippy::cast_possible_truncation)] // saturates, then range-checked
                let millis = (seconds * 1000.0).round() as i64;
                Timestamp::from_millisecond(millis)
            } else {
                return Err(format!("unsupported number {n}"));
            };
            ts.map(Some).map_err(|e| e.to_string())
        }
        other => Err(format!("expected timestamp, got {other}")),
    }
}

fn parse_time_of_day(value: &Value) -> Result<Option<Time>, String> {
    match value {
        Value::Null => Ok(None),
        _ => {
            let seconds = parse_i64(value)?;
            if !(0..86_400).contains(&seconds) {
                return Err(format!("time of day {seconds} out of range"));
            }
            #[allow(clippy::cast_possible_truncation)] // bounded by the range check
            let (hour, minute, second) = (
                (seconds / 3600) as i8,
                ((seconds / 60) % 60) as i8,
                (seconds % 60) as i8,
            );
            Time::new(hour, minute, second, 0)
                .map(Some)
                .map_err(|e| e.to_string())
        }
    }
}

fn parse_array(value: &Value) -> Result<Vec<Value>, String> {
    value
        .as_array()
        .cloned()
        .ok_or_else(|| format!("expected array, got {value}"))
}

fn parse_string_list(value: &Value) -> Result<Vec<String>, String> {
    parse_array(value)?.iter().map(parse_string).collect()
}

fn parse_id_list(value: &Value) -> Result<Option<RecordId>, String> {
    let ids = parse_string_list(value)?;
    match ids.first() {
        None => Ok(None),
        Some(id) => id.parse::<RecordId>().map(Some).map_err(|e| e.to_string()),
    }
}
