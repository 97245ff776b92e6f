use std::collections::{BTreeMap, BTreeSet};

use serde_json::Value;

use crate::domain::agency::Agency;
use crate::domain::campaign::Campaign;
use crate::domain::catalog::{Gaz, LeakStatus, Severity};
use crate::domain::leak::Leak;
use crate::domain::record::{Group, Relation, Resource, Table};
use crate::domain::repository::{Repository, Store};
use crate::domain::user::User;
use crate::domain::view::{Graph, Node, embeds_in};
use crate::error::InspectionsError;

/// Pending batch loads: `(table, column)` to the ids to match in `column`.
type Requests = BTreeMap<(Table, &'static str), BTreeSet<i32>>;

/// Loads every record the group embeds, one query per relation level, then
/// projects the roots.
pub struct ProjectUseCase<S: Store> {
    pub store: S,
}

impl<S: Store> ProjectUseCase<S> {
    pub async fn execute<T: Resource>(
        &self,
        records: &[T],
        group: Group,
    ) -> Result<Vec<Value>, InspectionsError> {
        let mut graph = Graph::new();
        let mut requests = Requests::new();
        for record in records {
            request(&mut requests, record, group, &graph);
        }
        while !requests.is_empty() {
            let mut loaded = Vec::new();
            for ((table, column), ids) in std::mem::take(&mut requests) {
                let ids: Vec<i32> = ids.into_iter().collect();
                for node in fetch(&self.store, table, column, &ids).await? {
                    let key = node.key();
                    if graph.insert(node) {
                        loaded.extend(key.map(|id| (table, id)));
                    }
                }
            }
            for (table, id) in loaded {
                if let Some(node) = graph.get(table, id) {
                    request(&mut requests, node, group, &graph);
                }
            }
        }
        tracing::debug!(group = group.as_str(), loaded = graph.len(), "projection graph loaded");
        Ok(records
            .iter()
            .map(|record| graph.project(record, group))
            .collect())
    }

    pub async fn execute_one<T: Resource>(
        &self,
        record: &T,
        group: Group,
    ) -> Result<Value, InspectionsError> {
        let mut projected = self.execute(std::slice::from_ref(record), group).await?;
        Ok(projected.pop().unwrap_or(Value::Null))
    }
}

fn request(requests: &mut Requests, node: &dyn Node, group: Group, graph: &Graph) {
    for embed in embeds_in(node, group) {
        match embed.relation {
            Relation::BelongsTo { field, target } => {
                if let Some(id) = node.reference(field).filter(|id| !graph.contains(target, *id)) {
                    requests.entry((target, "id")).or_default().insert(id);
                }
            }
            Relation::HasMany { target, field } => {
                if let Some(id) = node.key() {
                    requests.entry((target, field)).or_default().insert(id);
                }
            }
        }
    }
}

async fn fetch<S: Store>(
    store: &S,
    table: Table,
    column: &str,
    ids: &[i32],
) -> Result<Vec<Box<dyn Node>>, InspectionsError> {
    let nodes = match table {
        Table::Agencies => boxed(Repository::<Agency>::find_by_keys(store, column, ids).await?),
        Table::Users => boxed(Repository::<User>::find_by_keys(store, column, ids).await?),
        Table::Campaigns => boxed(Repository::<Campaign>::find_by_keys(store, column, ids).await?),
        Table::Gaz => boxed(Repository::<Gaz>::find_by_keys(store, column, ids).await?),
        Table::Severities => boxed(Repository::<Severity>::find_by_keys(store, column, ids).await?),
        Table::LeakStatuses => {
            boxed(Repository::<LeakStatus>::find_by_keys(store, column, ids).await?)
        }
        Table::Leaks => boxed(Repository::<Leak>::find_by_keys(store, column, ids).await?),
    };
    Ok(nodes)
}

fn boxed<T: Resource>(records: Vec<T>) -> Vec<Box<dyn Node>> {
    records
        .into_iter()
        .map(|record| Box::new(record) as Box<dyn Node>)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infra::memory::MemoryStore;
    use chrono::Utc;
    use serde_json::json;

    async fn save<T: Resource>(store: &MemoryStore, build: impl FnOnce(&mut T)) -> T {
        let mut record = T::blank(Utc::now());
        build(&mut record);
        Repository::<T>::save(store, record).await.unwrap()
    }

    #[tokio::test]
    async fn should_embed_leaks_with_status_and_severity_in_campaign_view() {
        let store = MemoryStore::new();
        let status: LeakStatus = save(&store, |s: &mut LeakStatus| {
            s.status_name = "Open".to_owned()
        })
        .await;
        let severity: Severity = save(&store, |s: &mut Severity| {
            s.severity_name = "High".to_owned()
        })
        .await;
        let campaign: Campaign = save(&store, |c: &mut Campaign| {
            c.society_name = "Acme".to_owned()
        })
        .await;
        for number in [2, 1] {
            save(&store, |l: &mut Leak| {
                l.leak_number = number;
                l.campaign_id = campaign.id;
                l.lm_status_id = status.id;
                l.severity_id = severity.id;
            })
            .await;
        }

        let project = ProjectUseCase { store };
        let doc = project
            .execute_one(&campaign, Group::Campaigns)
            .await
            .unwrap();
        assert_eq!(doc["user"], Value::Null);
        let leaks = doc["leaks"].as_array().unwrap();
        assert_eq!(leaks.len(), 2);
        assert_eq!(leaks[0]["leakNumber"], 2);
        assert_eq!(leaks[0]["lmStatus"], json!({ "statusName": "Open" }));
        assert_eq!(leaks[0]["severity"], json!({ "severityName": "High" }));
        assert!(leaks[0].get("leakLocation").is_none());
    }

    #[tokio::test]
    async fn should_embed_users_in_agency_view() {
        let store = MemoryStore::new();
        let agency: Agency = save(&store, |a: &mut Agency| a.name = "North".to_owned()).await;
        save(&store, |u: &mut User| {
            u.email = "ada@example.com".to_owned();
            u.password = "hash".to_owned();
            u.agency_id = agency.id;
        })
        .await;
        save(&store, |u: &mut User| u.email = "bob@example.com".to_owned()).await;

        let project = ProjectUseCase { store };
        let docs = project
            .execute(std::slice::from_ref(&agency), Group::Agencies)
            .await
            .unwrap();
        let users = docs[0]["users"].as_array().unwrap();
        assert_eq!(users.len(), 1);
        assert_eq!(users[0]["email"], "ada@example.com");
        assert!(users[0].get("password").is_none());
        assert!(users[0].get("agency").is_none());
    }

    #[tokio::test]
    async fn should_project_empty_list() {
        let project = ProjectUseCase {
            store: MemoryStore::new(),
        };
        let docs = project.execute::<Gaz>(&[], Group::Gaz).await.unwrap();
        assert!(docs.is_empty());
    }
}
