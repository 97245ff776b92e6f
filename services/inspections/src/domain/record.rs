//! The traits every stored entity implements, plus the relation metadata the
//! store and the projector share.

use std::fmt::Debug;

use chrono::{DateTime, Utc};
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;

use leakwatch_domain::reference::RefId;
use leakwatch_domain::validation::{FieldRules, FieldValue};

use crate::domain::repository::PasswordHasher;

/// One logical table per entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Table {
    Agencies,
    Users,
    Campaigns,
    Gaz,
    Severities,
    LeakStatuses,
    Leaks,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OnDelete {
    Cascade,
    SetNull,
}

/// A table whose `field` references the owning table's id.
#[derive(Debug, Clone, Copy)]
pub struct Dependent {
    pub table: Table,
    pub field: &'static str,
    pub on_delete: OnDelete,
}

const fn set_null(table: Table, field: &'static str) -> Dependent {
    Dependent {
        table,
        field,
        on_delete: OnDelete::SetNull,
    }
}

impl Table {
    pub fn name(self) -> &'static str {
        match self {
            Self::Agencies => "agencies",
            Self::Users => "users",
            Self::Campaigns => "campaigns",
            Self::Gaz => "gaz",
            Self::Severities => "severities",
            Self::LeakStatuses => "leak_statuses",
            Self::Leaks => "leaks",
        }
    }

    /// Singular name used in error messages.
    pub fn resource(self) -> &'static str {
        match self {
            Self::Agencies => "agency",
            Self::Users => "user",
            Self::Campaigns => "campaign",
            Self::Gaz => "gaz",
            Self::Severities => "severity",
            Self::LeakStatuses => "leak status",
            Self::Leaks => "leak",
        }
    }

    /// Rows in other tables affected when a row of this table is deleted.
    pub fn dependents(self) -> &'static [Dependent] {
        match self {
            Self::Agencies => AGENCY_DEPENDENTS,
            Self::Users => USER_DEPENDENTS,
            Self::Campaigns => CAMPAIGN_DEPENDENTS,
            Self::Severities => SEVERITY_DEPENDENTS,
            Self::LeakStatuses => LEAK_STATUS_DEPENDENTS,
            Self::Gaz | Self::Leaks => &[],
        }
    }
}

const AGENCY_DEPENDENTS: &[Dependent] = &[set_null(Table::Users, "agency_id")];
const USER_DEPENDENTS: &[Dependent] = &[
    set_null(Table::Campaigns, "user_id"),
    set_null(Table::Gaz, "user_id"),
    set_null(Table::Severities, "user_id"),
    set_null(Table::LeakStatuses, "user_id"),
    set_null(Table::Leaks, "user_id"),
];
const CAMPAIGN_DEPENDENTS: &[Dependent] = &[Dependent {
    table: Table::Leaks,
    field: "campaign_id",
    on_delete: OnDelete::Cascade,
}];
const SEVERITY_DEPENDENTS: &[Dependent] = &[set_null(Table::Leaks, "severity_id")];
const LEAK_STATUS_DEPENDENTS: &[Dependent] = &[set_null(Table::Leaks, "lm_status_id")];

/// Named output shapes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Group {
    Agencies,
    Users,
    Campaigns,
    Gaz,
    Severities,
    LeaksStatus,
    Leaks,
}

impl Group {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Agencies => "getAgencies",
            Self::Users => "getUsers",
            Self::Campaigns => "getCampaigns",
            Self::Gaz => "getGaz",
            Self::Severities => "getSeverities",
            Self::LeaksStatus => "getLeaksStatus",
            Self::Leaks => "getLeaks",
        }
    }
}

/// An own field and the groups it appears in.
#[derive(Debug, Clone, Copy)]
pub struct Exposure {
    pub key: &'static str,
    pub groups: &'static [Group],
}

/// How an embedded relation is found.
#[derive(Debug, Clone, Copy)]
pub enum Relation {
    /// The record's own `field` holds the target id.
    BelongsTo { field: &'static str, target: Table },
    /// Rows of `target` whose `field` equals the record's id.
    HasMany { target: Table, field: &'static str },
}

/// A related entity embedded under `key` in the listed groups.
#[derive(Debug, Clone, Copy)]
pub struct Embed {
    pub key: &'static str,
    pub groups: &'static [Group],
    pub relation: Relation,
}

/// A foreign key requested by a request body, resolved before validation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Link {
    pub field: &'static str,
    pub target: Table,
    pub requested: RefId,
}

/// A persisted row. The serde form is the storage form, not the public view.
pub trait Record: Clone + Debug + Serialize + DeserializeOwned + Send + Sync + 'static {
    const TABLE: Table;

    fn id(&self) -> Option<i32>;
    fn set_id(&mut self, id: i32);
    /// Value of a foreign-key column, by column name.
    fn foreign_key(&self, field: &str) -> Option<i32>;
    fn set_foreign_key(&mut self, field: &str, id: Option<i32>);
    fn touch(&mut self, now: DateTime<Utc>);
}

/// A record exposed as a REST resource.
pub trait Resource: Record {
    /// Request body accepted by create and update.
    type Payload: DeserializeOwned + Send;

    /// Collection path, e.g. `/api/agencies`.
    const PATH: &'static str;
    /// Group used for every response of this resource.
    const VIEW: Group;
    const RULES: &'static [FieldRules];
    const EXPOSED: &'static [Exposure];
    const EMBEDS: &'static [Embed];

    /// A fresh unsaved record stamped with `now`.
    fn blank(now: DateTime<Utc>) -> Self;
    /// Copy present payload fields onto the record and return its companion ids.
    fn apply(&mut self, payload: Self::Payload) -> Vec<Link>;
    /// Value of a public field for validation.
    fn field(&self, name: &str) -> FieldValue<'_>;
    /// JSON value of an exposed own field.
    fn expose(&self, key: &str) -> Value;
    /// Final transformation before the first write of new secrets.
    fn secure(&mut self, _hasher: &dyn PasswordHasher) {}
}

pub(crate) fn timestamp(dt: &DateTime<Utc>) -> Value {
    Value::String(leakwatch_core::serde::rfc3339_ms(dt))
}

pub(crate) fn optional_timestamp(dt: &Option<DateTime<Utc>>) -> Value {
    dt.as_ref().map_or(Value::Null, timestamp)
}
