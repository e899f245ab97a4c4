//! Skill gap analysis: compares a candidate's skills with what a role needs and
//! turns the gap into a readiness score, per-category coverage and an ordered
//! learning roadmap.

use std::collections::{BTreeMap, HashSet};

use serde::{Deserialize, Serialize};

use crate::gap::taxonomy::{Difficulty, SkillInfo, TaxonomyLookup};
use crate::parsing::models::dedupe_case_insensitive;

const UNCATEGORIZED: &str = "Uncategorized";
const DEFAULT_LEARNING_HOURS: u32 = 40;
const STUDY_HOURS_PER_WEEK: u32 = 10;

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct GapAnalysisRequest {
    pub current_role: String,
    pub current_skills: Vec<String>,
    pub target_role: String,
    pub job_description: String,
    pub experience_years: u32,
    /// Skills the role needs beyond those detected in `job_description`.
    pub required_skills: Vec<String>,
}

impl GapAnalysisRequest {
    /// True when there is nothing to derive requirements from.
    pub fn has_no_requirements(&self) -> bool {
        self.job_description.trim().is_empty()
            && self.required_skills.iter().all(|s| s.trim().is_empty())
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct GapReport {
    pub analysis: GapAnalysis,
    pub visualization_data: VisualizationData,
    pub learning_roadmap: Vec<RoadmapPhase>,
}

#[derive(Debug, Clone, Serialize)]
pub struct GapAnalysis {
    /// matched / required * 100, rounded down.
    pub readiness_score: u8,
    pub readiness_reasoning: String,
    pub matched_skills: Vec<String>,
    pub missing_skills: Vec<SkillGap>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SkillGap {
    pub skill: String,
    pub category: String,
    pub difficulty: Difficulty,
    pub avg_learning_hours: u32,
}

#[derive(Debug, Clone, Serialize)]
pub struct VisualizationData {
    /// Category → percent of that category's required skills already held.
    pub radar_chart: BTreeMap<String, u8>,
}

#[derive(Debug, Clone, Serialize)]
pub struct RoadmapPhase {
    pub phase: String,
    pub focus: String,
    pub duration: String,
    pub reasoning: String,
}

fn skill_info(taxonomy: &dyn TaxonomyLookup, skill: &str) -> SkillInfo {
    taxonomy.lookup(skill).unwrap_or_else(|| SkillInfo {
        difficulty: Difficulty::Intermediate,
        avg_learning_hours: DEFAULT_LEARNING_HOURS,
        category: UNCATEGORIZED.to_string(),
    })
}

/// Explicit requirements first, then taxonomy skills named in the job description.
pub fn required_skills(request: &GapAnalysisRequest, taxonomy: &dyn TaxonomyLookup) -> Vec<String> {
    let explicit = request
        .required_skills
        .iter()
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty());
    let mentioned = taxonomy.mentioned_in(&request.job_description);
    dedupe_case_insensitive(explicit.chain(mentioned))
}

pub fn analyze_gap(request: &GapAnalysisRequest, taxonomy: &dyn TaxonomyLookup) -> GapReport {
    let required = required_skills(request, taxonomy);
    let held: HashSet<String> = request
        .current_skills
        .iter()
        .map(|s| s.trim().to_lowercase())
        .collect();

    let (matched, missing): (Vec<String>, Vec<String>) = required
        .iter()
        .cloned()
        .partition(|skill| held.contains(&skill.to_lowercase()));

    let readiness_score = if required.is_empty() {
        0
    } else {
        (matched.len() * 100 / required.len()) as u8
    };

    let mut gaps: Vec<SkillGap> = missing
        .iter()
        .map(|skill| {
            let info = skill_info(taxonomy, skill);
            SkillGap {
                skill: skill.clone(),
                category: info.category,
                difficulty: info.difficulty,
                avg_learning_hours: info.avg_learning_hours,
            }
        })
        .collect();
    gaps.sort_by(|a, b| {
        a.difficulty
            .cmp(&b.difficulty)
            .then(a.avg_learning_hours.cmp(&b.avg_learning_hours))
            .then_with(|| a.skill.to_lowercase().cmp(&b.skill.to_lowercase()))
    });

    let target = target_label(&request.target_role);
    let learning_roadmap = gaps
        .iter()
        .enumerate()
        .map(|(i, gap)| RoadmapPhase {
            phase: format!("Phase {}", i + 1),
            focus: gap.skill.clone(),
            duration: describe_duration(gap.avg_learning_hours),
            reasoning: format!(
                "{} is a {} {} skill required for {target}.",
                gap.skill, gap.difficulty, gap.category
            ),
        })
        .collect();

    GapReport {
        analysis: GapAnalysis {
            readiness_score,
            readiness_reasoning: readiness_reasoning(request, &matched, &gaps, required.len()),
            matched_skills: matched,
            missing_skills: gaps,
        },
        visualization_data: VisualizationData {
            radar_chart: category_coverage(&required, &held, taxonomy),
        },
        learning_roadmap,
    }
}

fn category_coverage(
    required: &[String],
    held: &HashSet<String>,
    taxonomy: &dyn TaxonomyLookup,
) -> BTreeMap<String, u8> {
    let mut totals: BTreeMap<String, (usize, usize)> = BTreeMap::new();
    for skill in required {
        let entry = totals
            .entry(skill_info(taxonomy, skill).category)
            .or_default();
        entry.1 += 1;
        if held.contains(&skill.to_lowercase()) {
            entry.0 += 1;
        }
    }
    totals
        .into_iter()
        .map(|(category, (have, total))| (category, (have * 100 / total) as u8))
        .collect()
}

fn target_label(target_role: &str) -> String {
    let target = target_role.trim();
    if target.is_empty() {
        "the target role".to_string()
    } else {
        target.to_string()
    }
}

fn describe_duration(hours: u32) -> String {
    let weeks = hours.div_ceil(STUDY_HOURS_PER_WEEK).max(1);
    let unit = if weeks == 1 { "week" } else { "weeks" };
    format!("{hours} hours (~{weeks} {unit})")
}

fn readiness_reasoning(
    request: &GapAnalysisRequest,
    matched: &[String],
    gaps: &[SkillGap],
    required: usize,
) -> String {
    let target = target_label(&request.target_role);
    if required == 0 {
        return format!("No required skills could be identified for {target}.");
    }

    let mut reasoning = format!(
        "Matches {} of {required} required skills for {target}.",
        matched.len()
    );
    if !request.current_role.trim().is_empty() && request.experience_years > 0 {
        reasoning.push_str(&format!(
            " Coming from {} with {} year(s) of experience.",
            request.current_role.trim(),
            request.experience_years
        ));
    }
    if !gaps.is_empty() {
        let hours: u32 = gaps.iter().map(|g| g.avg_learning_hours).sum();
        let names: Vec<&str> = gaps.iter().map(|g| g.skill.as_str()).collect();
        reasoning.push_str(&format!(
            " Closing the gap ({}) takes roughly {hours} hours of study.",
            names.join(", ")
        ));
    }
    reasoning
}
