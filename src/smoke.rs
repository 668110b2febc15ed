use std::time::Duration;

use anyhow::{Context, Result};
use serde_json::Value;
use tracing::debug;

/// What the read-only smoke test observed.
#[derive(Debug)]
pub struct SmokeReport {
    pub list_status: u16,
    pub count: usize,
    /// (id, status) of the by-identifier probe, when the list gave us an id.
    pub by_id: Option<(u64, u16)>,
    pub chapter_numbers: Vec<u32>,
}

impl SmokeReport {
    pub fn chapter_range(&self) -> Option<(u32, u32)> {
        let min = self.chapter_numbers.iter().min()?;
        let max = self.chapter_numbers.iter().max()?;
        Some((*min, *max))
    }
}

/// Issue read-only requests against the list endpoint and the
/// by-identifier endpoint. Never mutates anything server-side; a refused
/// connection surfaces as an error with the target URL in the message.
pub fn run(api_base: &str) -> Result<SmokeReport> {
    let client = reqwest::blocking::Client::builder()
        .timeout(Duration::from_secs(10))
        .build()?;

    let list_url = format!("{}/study-notes", api_base.trim_end_matches('/'));
    debug!(url = %list_url, "probing list endpoint");
    let response = client
        .get(&list_url)
        .send()
        .with_context(|| format!("cannot connect to {list_url}"))?;
    let list_status = response.status().as_u16();

    let notes: Vec<Value> = if response.status().is_success() {
        response.json().unwrap_or_default()
    } else {
        Vec::new()
    };

    let by_id = match notes.first().and_then(|n| n.get("id")).and_then(Value::as_u64) {
        Some(id) => {
            let response = client.get(format!("{list_url}/{id}")).send()?;
            Some((id, response.status().as_u16()))
        }
        None => None,
    };

    let chapter_numbers = notes
        .iter()
        .filter_map(|n| n.get("chapterNumber"))
        .filter_map(Value::as_u64)
        .map(|n| n as u32)
        .collect();

    Ok(SmokeReport {
        list_status,
        count: notes.len(),
        by_id,
        chapter_numbers,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn chapter_range_over_observed_notes() {
        let report = SmokeReport {
            list_status: 200,
            count: 3,
            by_id: Some((1, 200)),
            chapter_numbers: vec![9, 2, 5],
        };
        assert_eq!(report.chapter_range(), Some((2, 9)));
    }

    #[test]
    fn empty_report_has_no_range() {
        let report = SmokeReport {
            list_status: 500,
            count: 0,
            by_id: None,
            chapter_numbers: vec![],
        };
        assert_eq!(report.chapter_range(), None);
    }
}
