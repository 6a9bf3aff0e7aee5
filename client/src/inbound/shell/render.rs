//! Plain-text rendering of screens.

use crate::domain::{
    CandidateSnapshot, CandidateTab, Candidate, ChallengeBoard, CompanySnapshot, DashboardKind,
    LoadState, Project, Screen, Submission,
};

/// Render `screen` using the presenters' current data.
#[must_use]
pub fn screen(
    screen: &Screen,
    candidate: &CandidateSnapshot,
    company: &CompanySnapshot,
) -> String {
    let lines = match screen {
        Screen::Loading => vec!["Loading Echelon...".to_owned()],
        Screen::Landing => landing(),
        Screen::LoginForm => login_form(),
        Screen::RegisterForm => register_form(),
        Screen::Dashboard { navigation, kind } => {
            let mut lines = vec![
                format!("Echelon | {} | logout", navigation.email),
                String::new(),
            ];
            lines.extend(match kind {
                DashboardKind::Candidate => candidate_dashboard(candidate),
                DashboardKind::Company => company_dashboard(company),
            });
            lines
        }
    };
    lines.join("\n")
}

fn landing() -> Vec<String> {
    [
        "ECHELON",
        "Where proven engineering talent meets the companies that need it.",
        "",
        "start  Get started",
    ]
    .map(str::to_owned)
    .to_vec()
}

fn login_form() -> Vec<String> {
    [
        "Welcome Back",
        "Sign in to your account",
        "",
        "login <email> <password>",
        "switch  Don't have an account? Sign up",
        "back    Back to home",
    ]
    .map(str::to_owned)
    .to_vec()
}

fn register_form() -> Vec<String> {
    [
        "Join Echelon",
        "Create your account",
        "",
        "register <email> [candidate|company]",
        "switch  Already have an account? Sign in",
        "back    Back to home",
    ]
    .map(str::to_owned)
    .to_vec()
}

fn candidate_dashboard(snapshot: &CandidateSnapshot) -> Vec<String> {
    let mut lines = vec![
        "Welcome to Echelon".to_owned(),
        "Elite coding challenges for exceptional developers".to_owned(),
    ];
    match &snapshot.data {
        LoadState::Idle | LoadState::Loading => lines.push("Loading challenges...".to_owned()),
        LoadState::Failed(error) => lines.push(format!("Could not load challenges: {error}")),
        LoadState::Loaded(board) => lines.extend(challenge_board(board, snapshot.tab)),
    }
    lines
}

fn challenge_board(board: &ChallengeBoard, tab: CandidateTab) -> Vec<String> {
    let mut lines = vec![
        format!(
            "Average score: {} | Challenges completed: {}",
            board.average_score(),
            board.challenges_completed()
        ),
        String::new(),
    ];
    match tab {
        CandidateTab::Projects => {
            lines.push("[Projects]  Submissions".to_owned());
            lines.extend(board.projects.iter().flat_map(project));
        }
        CandidateTab::Submissions => {
            lines.push(" Projects  [Submissions]".to_owned());
            lines.extend(board.submissions.iter().flat_map(submission));
        }
    }
    lines
}

fn project(project: &Project) -> [String; 3] {
    [
        format!(
            "  #{} {} ({}, {} min)",
            project.id, project.title, project.difficulty, project.time_limit
        ),
        format!(
            "     est. score {} | {} completions | {}",
            project.estimated_score,
            project.completions,
            project.tags.join(", ")
        ),
        format!("     challenge {}", project.id),
    ]
}

fn submission(submission: &Submission) -> [String; 2] {
    [
        format!(
            "  {} | {} | score {} | {} | {}",
            submission.project_title,
            submission.submitted_at,
            submission.score,
            submission.rank,
            submission.status
        ),
        format!("     {}", submission.feedback),
    ]
}

fn company_dashboard(snapshot: &CompanySnapshot) -> Vec<String> {
    let mut lines = vec![
        "Company Dashboard".to_owned(),
        "Discover and recruit elite engineering talent".to_owned(),
    ];
    match &snapshot.data {
        LoadState::Idle | LoadState::Loading => lines.push("Loading candidates...".to_owned()),
        LoadState::Failed(error) => lines.push(format!("Could not load candidates: {error}")),
        LoadState::Loaded(candidates) => {
            lines.push("Recommended candidates".to_owned());
            lines.extend(candidates.iter().flat_map(candidate));
        }
    }
    lines
}

fn candidate(candidate: &Candidate) -> [String; 3] {
    [
        format!(
            "  [{}] {} | score {} | {} | {} projects",
            candidate.initials(),
            candidate.name,
            candidate.score,
            candidate.rank,
            candidate.projects
        ),
        format!("       {} | {}", candidate.experience, candidate.location),
        format!("       {}", candidate.skills.join(", ")),
    ]
}
