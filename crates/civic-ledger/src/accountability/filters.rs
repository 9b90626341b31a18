//! Collection narrowing for the leader directory and project tracker.
//!
//! Filters borrow their input and return a fresh `Vec` of references, so
//! they chain in any order: each one is a plain predicate intersection.

use super::domain::{Leader, Project};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Dropdown sentinel meaning "do not filter on this field".
pub const ALL_FILTER: &str = "All";

fn is_pass_through(value: &str) -> bool {
    let value = value.trim();
    value.is_empty() || value.eq_ignore_ascii_case(ALL_FILTER)
}

fn contains_ignore_case(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(needle)
}

fn filter_by<'a, T, I, F>(items: I, value: &str, field: F) -> Vec<&'a T>
where
    T: 'a,
    I: IntoIterator<Item = &'a T>,
    F: Fn(&'a T) -> Option<&'a str>,
{
    if is_pass_through(value) {
        return items.into_iter().collect();
    }

    let value = value.trim();
    items
        .into_iter()
        .filter(|item| field(*item) == Some(value))
        .collect()
}

pub fn filter_leaders_by_position<'a, I>(leaders: I, position: &str) -> Vec<&'a Leader>
where
    I: IntoIterator<Item = &'a Leader>,
{
    filter_by(leaders, position, |leader| Some(leader.position.as_str()))
}

pub fn filter_leaders_by_county<'a, I>(leaders: I, county: &str) -> Vec<&'a Leader>
where
    I: IntoIterator<Item = &'a Leader>,
{
    filter_by(leaders, county, |leader| Some(leader.county.as_str()))
}

pub fn filter_leaders_by_party<'a, I>(leaders: I, party: &str) -> Vec<&'a Leader>
where
    I: IntoIterator<Item = &'a Leader>,
{
    filter_by(leaders, party, |leader| Some(leader.party.as_str()))
}

pub fn search_leaders_by_name<'a, I>(leaders: I, query: &str) -> Vec<&'a Leader>
where
    I: IntoIterator<Item = &'a Leader>,
{
    let needle = query.trim().to_lowercase();
    leaders
        .into_iter()
        .filter(|leader| needle.is_empty() || contains_ignore_case(&leader.name, &needle))
        .collect()
}

pub fn filter_projects_by_category<'a, I>(projects: I, category: &str) -> Vec<&'a Project>
where
    I: IntoIterator<Item = &'a Project>,
{
    filter_by(projects, category, |project| Some(project.category.as_str()))
}

/// Accepts a status key (`in_progress`), its label (`In Progress`) or the
/// legacy `ongoing` value.
pub fn filter_projects_by_status<'a, I>(projects: I, status: &str) -> Vec<&'a Project>
where
    I: IntoIterator<Item = &'a Project>,
{
    if is_pass_through(status) {
        return projects.into_iter().collect();
    }

    projects
        .into_iter()
        .filter(|project| project.status.matches(status))
        .collect()
}

pub fn filter_projects_by_county<'a, I>(projects: I, county: &str) -> Vec<&'a Project>
where
    I: IntoIterator<Item = &'a Project>,
{
    filter_by(projects, county, Project::county)
}

/// Case-insensitive substring match over project name and description.
pub fn search_projects<'a, I>(projects: I, query: &str) -> Vec<&'a Project>
where
    I: IntoIterator<Item = &'a Project>,
{
    let needle = query.trim().to_lowercase();
    projects
        .into_iter()
        .filter(|project| {
            needle.is_empty()
                || contains_ignore_case(&project.name, &needle)
                || contains_ignore_case(&project.description, &needle)
        })
        .collect()
}

fn unique_sorted<'a, I>(values: I) -> Vec<String>
where
    I: IntoIterator<Item = &'a str>,
{
    values
        .into_iter()
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .map(str::to_string)
        .collect()
}

pub fn unique_counties(leaders: &[Leader]) -> Vec<String> {
    unique_sorted(leaders.iter().map(|leader| leader.county.as_str()))
}

pub fn unique_parties(leaders: &[Leader]) -> Vec<String> {
    unique_sorted(leaders.iter().map(|leader| leader.party.as_str()))
}

pub fn unique_positions(leaders: &[Leader]) -> Vec<String> {
    unique_sorted(leaders.iter().map(|leader| leader.position.as_str()))
}

pub fn unique_project_categories(projects: &[Project]) -> Vec<String> {
    unique_sorted(projects.iter().map(|project| project.category.as_str()))
}

/// Directory filter as sent by the leader search form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeaderFilter {
    #[serde(default)]
    pub position: Option<String>,
    #[serde(default)]
    pub county: Option<String>,
    #[serde(default)]
    pub party: Option<String>,
    #[serde(default, alias = "q")]
    pub query: Option<String>,
}

impl LeaderFilter {
    pub fn apply<'a>(&self, leaders: &'a [Leader]) -> Vec<&'a Leader> {
        let mut matches: Vec<&'a Leader> = leaders.iter().collect();
        if let Some(position) = self.position.as_deref() {
            matches = filter_leaders_by_position(matches, position);
        }
        if let Some(county) = self.county.as_deref() {
            matches = filter_leaders_by_county(matches, county);
        }
        if let Some(party) = self.party.as_deref() {
            matches = filter_leaders_by_party(matches, party);
        }
        if let Some(query) = self.query.as_deref() {
            matches = search_leaders_by_name(matches, query);
        }
        matches
    }
}

/// Project tracker filter bar.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectFilter {
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub county: Option<String>,
    #[serde(default, alias = "q")]
    pub query: Option<String>,
}

impl ProjectFilter {
    pub fn apply<'a>(&self, projects: &'a [Project]) -> Vec<&'a Project> {
        let mut matches: Vec<&'a Project> = projects.iter().collect();
        if let Some(category) = self.category.as_deref() {
            matches = filter_projects_by_category(matches, category);
        }
        if let Some(status) = self.status.as_deref() {
            matches = filter_projects_by_status(matches, status);
        }
        if let Some(county) = self.county.as_deref() {
            matches = filter_projects_by_county(matches, county);
        }
        if let Some(query) = self.query.as_deref() {
            matches = search_projects(matches, query);
        }
        matches
    }
}
