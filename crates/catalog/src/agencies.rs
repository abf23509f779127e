//! Agency directory folded from agency/agent join rows.

use std::collections::HashMap;

use common::{AgencyId, AgentId};
use serde::Serialize;
use store::{AgencyAgentRow, AgentRow};

/// An agent listed under its agency.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct AgentListing {
    pub agent_id: AgentId,
    pub agt_first_name: Option<String>,
    pub agt_last_name: Option<String>,
    pub agt_bus_phone: Option<String>,
    pub agt_email: Option<String>,
}

impl From<AgentRow> for AgentListing {
    fn from(row: AgentRow) -> Self {
        Self {
            agent_id: row.agent_id,
            agt_first_name: row.agt_first_name,
            agt_last_name: row.agt_last_name,
            agt_bus_phone: row.agt_bus_phone,
            agt_email: row.agt_email,
        }
    }
}

/// An agency with its agents, as shown on the contact page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct AgencyListing {
    pub agency_id: AgencyId,
    pub agncy_address: Option<String>,
    pub agncy_city: Option<String>,
    pub agncy_prov: Option<String>,
    pub agncy_postal: Option<String>,
    pub agncy_country: Option<String>,
    pub agncy_phone: Option<String>,
    pub agncy_fax: Option<String>,
    pub agents: Vec<AgentListing>,
}

impl AgencyListing {
    fn from_row_columns(row: &AgencyAgentRow) -> Self {
        Self {
            agency_id: row.agency_id,
            agncy_address: row.agncy_address.clone(),
            agncy_city: row.agncy_city.clone(),
            agncy_prov: row.agncy_prov.clone(),
            agncy_postal: row.agncy_postal.clone(),
            agncy_country: row.agncy_country.clone(),
            agncy_phone: row.agncy_phone.clone(),
            agncy_fax: row.agncy_fax.clone(),
            agents: Vec::new(),
        }
    }
}

/// Folds ordered join rows into one listing per agency.
///
/// Agencies come out in first-seen order and agents in row order. A row
/// without an agent still creates its agency, so an agency with no agents
/// appears once with an empty agent list.
pub fn fold_agency_rows(rows: impl IntoIterator<Item = AgencyAgentRow>) -> Vec<AgencyListing> {
    let mut listings: Vec<AgencyListing> = Vec::new();
    let mut positions: HashMap<AgencyId, usize> = HashMap::new();

    for row in rows {
        let index = *positions.entry(row.agency_id).or_insert_with(|| {
            listings.push(AgencyListing::from_row_columns(&row));
            listings.len() - 1
        });

        if let Some(agent) = row.agent {
            listings[index].agents.push(agent.into());
        }
    }

    listings
}
