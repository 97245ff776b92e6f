use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

use leakwatch_domain::patch::Patch;
use leakwatch_domain::reference::RefId;
use leakwatch_domain::validation::{FieldRules, FieldValue, Rule};

use crate::domain::record::{
    Embed, Exposure, Group, Link, Record, Relation, Resource, Table, optional_timestamp,
    timestamp,
};
use crate::domain::repository::PasswordHasher;

/// Role every user has regardless of what is stored.
pub const DEFAULT_ROLE: &str = "ROLE_USER";

/// An inspector account.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: Option<i32>,
    pub agency_id: Option<i32>,
    pub email: String,
    /// Stored roles as submitted; see [`User::effective_roles`].
    pub roles: Value,
    /// PBKDF2 hash. Empty until first saved.
    pub password: String,
    /// Submitted password awaiting validation and hashing.
    #[serde(skip)]
    pub plain_password: Option<String>,
    pub first_name: String,
    pub last_name: String,
    pub phone_number: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserPayload {
    #[serde(default)]
    pub email: Patch<String>,
    #[serde(default)]
    pub roles: Patch<Value>,
    #[serde(default)]
    pub password: Patch<String>,
    #[serde(default)]
    pub first_name: Patch<String>,
    #[serde(default)]
    pub last_name: Patch<String>,
    #[serde(default)]
    pub phone_number: Patch<String>,
    #[serde(default)]
    pub agency_id: RefId,
}

impl User {
    /// Stored string roles plus [`DEFAULT_ROLE`], without duplicates.
    pub fn effective_roles(&self) -> Vec<String> {
        let mut roles: Vec<String> = Vec::new();
        let stored = self.roles.as_array().into_iter().flatten();
        for role in stored.filter_map(Value::as_str).chain([DEFAULT_ROLE]) {
            if !roles.iter().any(|r| r == role) {
                roles.push(role.to_owned());
            }
        }
        roles
    }
}

impl Record for User {
    const TABLE: Table = Table::Users;

    fn id(&self) -> Option<i32> {
        self.id
    }

    fn set_id(&mut self, id: i32) {
        self.id = Some(id);
    }

    fn foreign_key(&self, field: &str) -> Option<i32> {
        match field {
            "agency_id" => self.agency_id,
            _ => None,
        }
    }

    fn set_foreign_key(&mut self, field: &str, id: Option<i32>) {
        if field == "agency_id" {
            self.agency_id = id;
        }
    }

    fn touch(&mut self, now: DateTime<Utc>) {
        self.updated_at = Some(now);
    }
}

const PUBLIC: &[Group] = &[Group::Users, Group::Campaigns, Group::Agencies];

impl Resource for User {
    type Payload = UserPayload;

    const PATH: &'static str = "/api/users";
    const VIEW: Group = Group::Users;
    const RULES: &'static [FieldRules] = &[
        FieldRules {
            field: "email",
            rules: &[
                Rule::Required {
                    message: "Email cannot be blank or null",
                },
                Rule::Email {
                    message: "The email {{ value }} is not a valid email.",
                },
                Rule::Unique {
                    column: "email",
                    message: "this email is already used",
                },
            ],
        },
        FieldRules {
            field: "roles",
            rules: &[Rule::StringList {
                message: "You've entered an invalid Json.",
            }],
        },
        FieldRules {
            field: "password",
            rules: &[
                Rule::Required {
                    message: "Password cannot be blank or null",
                },
                Rule::Length {
                    min: 2,
                    max: 50,
                    min_message: "Your password must be at least {{ limit }} characters long",
                    max_message: "Your password cannot be longer than {{ limit }} characters",
                },
            ],
        },
        FieldRules {
            field: "firstName",
            rules: &[
                Rule::Required {
                    message: "firstname cannot be blank or null",
                },
                Rule::Length {
                    min: 2,
                    max: 100,
                    min_message: "Your firstname must be at least {{ limit }} characters long",
                    max_message: "Your firstname cannot be longer than {{ limit }} characters",
                },
            ],
        },
        FieldRules {
            field: "lastName",
            rules: &[
                Rule::Required {
                    message: "lastname cannot be blank or null",
                },
                Rule::Length {
                    min: 2,
                    max: 100,
                    min_message: "Your lastname must be at least {{ limit }} characters long",
                    max_message: "Your lastname cannot be longer than {{ limit }} characters",
                },
            ],
        },
    ];
    const EXPOSED: &'static [Exposure] = &[
        Exposure {
            key: "id",
            groups: PUBLIC,
        },
        Exposure {
            key: "email",
            groups: PUBLIC,
        },
        Exposure {
            key: "firstName",
            groups: PUBLIC,
        },
        Exposure {
            key: "lastName",
            groups: PUBLIC,
        },
        Exposure {
            key: "phoneNumber",
            groups: PUBLIC,
        },
        Exposure {
            key: "roles",
            groups: &[Group::Users],
        },
        Exposure {
            key: "createdAt",
            groups: &[Group::Users],
        },
        Exposure {
            key: "updatedAt",
            groups: &[Group::Users],
        },
    ];
    const EMBEDS: &'static [Embed] = &[Embed {
        key: "agency",
        groups: &[Group::Users],
        relation: Relation::BelongsTo {
            field: "agency_id",
            target: Table::Agencies,
        },
    }];

    fn blank(now: DateTime<Utc>) -> Self {
        Self {
            id: None,
            agency_id: None,
            email: String::new(),
            roles: json!([]),
            password: String::new(),
            plain_password: None,
            first_name: String::new(),
            last_name: String::new(),
            phone_number: None,
            created_at: now,
            updated_at: None,
        }
    }

    fn apply(&mut self, payload: UserPayload) -> Vec<Link> {
        payload.email.apply(&mut self.email);
        match payload.roles {
            Patch::Absent => {}
            Patch::Null => self.roles = json!([]),
            Patch::Value(roles) => self.roles = roles,
        }
        if let Patch::Value(password) = payload.password {
            self.plain_password = Some(password);
        }
        payload.first_name.apply(&mut self.first_name);
        payload.last_name.apply(&mut self.last_name);
        payload.phone_number.apply_opt(&mut self.phone_number);
        vec![Link {
            field: "agency_id",
            target: Table::Agencies,
            requested: payload.agency_id,
        }]
    }

    fn field(&self, name: &str) -> FieldValue<'_> {
        match name {
            "email" => FieldValue::Text(Some(self.email.as_str())),
            "roles" => FieldValue::Json(&self.roles),
            "password" => match (&self.plain_password, self.password.is_empty()) {
                (Some(plain), _) => FieldValue::Text(Some(plain.as_str())),
                (None, true) => FieldValue::Text(None),
                (None, false) => FieldValue::Unchanged,
            },
            "firstName" => FieldValue::Text(Some(self.first_name.as_str())),
            "lastName" => FieldValue::Text(Some(self.last_name.as_str())),
            _ => FieldValue::Unchanged,
        }
    }

    fn expose(&self, key: &str) -> Value {
        match key {
            "id" => json!(self.id),
            "email" => json!(self.email),
            "firstName" => json!(self.first_name),
            "lastName" => json!(self.last_name),
            "phoneNumber" => json!(self.phone_number),
            "roles" => json!(self.effective_roles()),
            "createdAt" => timestamp(&self.created_at),
            "updatedAt" => optional_timestamp(&self.updated_at),
            _ => Value::Null,
        }
    }

    fn secure(&mut self, hasher: &dyn PasswordHasher) {
        if let Some(plain) = self.plain_password.take() {
            self.password = hasher.hash(&plain);
        }
    }
}
