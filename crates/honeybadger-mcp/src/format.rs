//! Plain-text reports rendered from Honeybadger records.
//!
//! All reports use the same Markdown-flavoured layout: a `#` title, `##`
//! headings per item and `- Key: value` lines. Backtrace frames are always
//! printed in the order upstream supplied them.

use honeybadger::domain::{BacktraceFrame, Fault, Notice, Project};

const NOT_SPECIFIED: &str = "Not specified";

/// All projects, as served by `honeybadger://projects`.
#[must_use]
pub fn projects_list(projects: &[Project]) -> String {
    let items: Vec<String> = projects
        .iter()
        .map(|project| {
            format!(
                "## {} (ID: {})\n- Faults: {} ({} unresolved)\n- Environments: {}\n- Last error: {}\n",
                project.name,
                project.id,
                project.fault_count,
                project.unresolved_fault_count,
                project.environments.join(", "),
                or_never(project.last_notice_at.as_deref()),
            )
        })
        .collect();

    format!("# Honeybadger Projects\n\n{}", items.join("\n"))
}

/// Detailed view of one project.
#[must_use]
pub fn project(project: &Project) -> String {
    let mut out = format!("# Project: {} (ID: {})\n\n", project.name, project.id);
    out.push_str(&project_summary_lines(project));

    if let Some(owner) = &project.owner {
        out.push_str(&format!("- Owner: {} ({})\n", owner.name, owner.email));
    }
    if !project.teams.is_empty() {
        let teams: Vec<&str> = project.teams.iter().map(|t| t.name.as_str()).collect();
        out.push_str(&format!("- Teams: {}\n", teams.join(", ")));
    }

    out
}

/// Project detail followed by a hint to reuse the ID, for `find_project`.
#[must_use]
pub fn found_project(found: &Project) -> String {
    format!(
        "{}\nYou can use this project ID ({}) for searching faults and accessing error details.",
        project(found),
        found.id
    )
}

/// The configured default project, for `honeybadger://default-project`.
#[must_use]
pub fn default_project(project: &Project) -> String {
    format!(
        "# Default Project: {} (ID: {})\n\n{}\nYou can use this project ID ({}) for searching faults and accessing error details without needing to specify it every time.",
        project.name,
        project.id,
        project_summary_lines(project),
        project.id
    )
}

/// Faults of a project, for `honeybadger://projects/{id}/faults`.
#[must_use]
pub fn faults_list(faults: &[Fault]) -> String {
    let items: Vec<String> = faults
        .iter()
        .map(|fault| {
            let mut item = format!(
                "## {}: {} (ID: {})\n- Environment: {}\n- Status: {}\n- Occurrences: {}\n- First seen: {}\n- Last seen: {}\n",
                fault.klass,
                fault.message,
                fault.id,
                fault.environment.as_deref().unwrap_or_default(),
                status(fault),
                fault.notices_count,
                fault.created_at,
                fault.last_notice_at,
            );
            if let Some(assignee) = &fault.assignee {
                item.push_str(&format!("- Assigned to: {}\n", assignee.name));
            }
            item
        })
        .collect();

    format!("# Faults\n\n{}", items.join("\n\n"))
}

/// Faults of the default project, for `honeybadger://default-project/faults`.
#[must_use]
pub fn default_project_faults(project_id: u64, faults: &[Fault]) -> String {
    let items: Vec<String> = faults
        .iter()
        .map(|fault| {
            format!(
                "## {}: {} (ID: {})\n- Environment: {}\n- Status: {}\n- Occurrences: {}\n- First seen: {}\n- Last seen: {}\n",
                fault.klass,
                fault.message,
                fault.id,
                environment(fault),
                status(fault),
                fault.notices_count,
                fault.created_at,
                fault.last_notice_at,
            )
        })
        .collect();

    format!(
        "# Faults in Default Project (ID: {project_id})\n\n{}",
        items.join("\n\n")
    )
}

/// Detailed view of one fault.
#[must_use]
pub fn fault(fault: &Fault) -> String {
    let mut out = format!(
        "# Fault: {}: {} (ID: {})\n\n- Project ID: {}\n- Environment: {}\n- Component: {}\n- Status: {}\n- Occurrences: {}\n- First seen: {}\n- Last seen: {}\n",
        fault.klass,
        fault.message,
        fault.id,
        fault.project_id,
        fault.environment.as_deref().unwrap_or_default(),
        non_empty(fault.component.as_deref()).unwrap_or("N/A"),
        status(fault),
        fault.notices_count,
        fault.created_at,
        fault.last_notice_at,
    );

    if let Some(assignee) = &fault.assignee {
        out.push_str(&format!(
            "- Assigned to: {} ({})\n",
            assignee.name, assignee.email
        ));
    }
    if !fault.tags.is_empty() {
        out.push_str(&format!("- Tags: {}\n", fault.tags.join(", ")));
    }
    out.push_str(&format!(
        "- URL: {}\n",
        fault.url.as_deref().unwrap_or_default()
    ));

    out
}

/// Notices of a fault with indented backtraces.
#[must_use]
pub fn notices_list(notices: &[Notice]) -> String {
    let items: Vec<String> = notices
        .iter()
        .map(|notice| {
            let mut item = format!(
                "## Notice: {}\n- Created at: {}\n- Message: {}\n",
                notice.id, notice.created_at, notice.message
            );
            if let Some(request) = &notice.request {
                item.push_str(&format!(
                    "- URL: {}\n",
                    non_empty(request.url.as_deref()).unwrap_or("N/A")
                ));
            }
            if notice.backtrace.is_empty() {
                item.push_str("- No backtrace available\n");
            } else {
                let frames: Vec<String> = notice
                    .backtrace
                    .iter()
                    .map(|f| format!("  - {}:{} in {}", f.file, f.number, f.method))
                    .collect();
                item.push_str(&format!("- Backtrace:\n{}\n", frames.join("\n")));
            }
            item
        })
        .collect();

    format!("# Error Notices\n\n{}", items.join("\n\n"))
}

/// Result of the `search_faults` tool.
#[must_use]
pub fn search_results(faults: &[Fault], project: &Project) -> String {
    if faults.is_empty() {
        return format!(
            "No faults found for project \"{}\" (ID: {}) with the given criteria.",
            project.name, project.id
        );
    }

    let items: Vec<String> = faults
        .iter()
        .map(|fault| {
            format!(
                "## [{}{}] {}: {}\n- ID: {}\n- Environment: {}\n- Occurrences: {}\n- First seen: {}\n- Last seen: {}\n- URL: {}\n",
                state(fault),
                if fault.ignored { " (Ignored)" } else { "" },
                fault.klass,
                fault.message,
                fault.id,
                environment(fault),
                fault.notices_count,
                fault.created_at,
                fault.last_notice_at,
                fault.url.as_deref().unwrap_or_default(),
            )
        })
        .collect();

    format!(
        "# Search Results: Found {} faults in \"{}\" (ID: {})\n\n{}",
        faults.len(),
        project.name,
        project.id,
        items.join("\n\n")
    )
}

/// Result of the `get_backtrace` tool.
#[must_use]
pub fn backtraces(fault: &Fault, notices: &[Notice], project: &Project) -> String {
    let mut out = format!(
        "# Backtrace for {}: {}\n- Fault ID: {}\n- Project: {} (ID: {})\n- Environment: {}\n- Status: {}\n\n",
        fault.klass,
        fault.message,
        fault.id,
        project.name,
        project.id,
        environment(fault),
        status(fault),
    );

    for (index, notice) in notices.iter().enumerate() {
        out.push_str(&format!("## Notice {}: {}\n", index + 1, notice.id));
        out.push_str(&format!("- Created at: {}\n", notice.created_at));

        if let Some(request) = &notice.request {
            if let Some(url) = non_empty(request.url.as_deref()) {
                out.push_str(&format!("- URL: {url}\n"));
            }
            if let (Some(component), Some(action)) = (
                non_empty(request.component.as_deref()),
                non_empty(request.action.as_deref()),
            ) {
                out.push_str(&format!("- Component/Action: {component}#{action}\n"));
            }
        }

        out.push_str("\n### Backtrace:\n");
        if notice.backtrace.is_empty() {
            out.push_str("No backtrace available for this notice.\n");
        } else {
            out.push_str(&numbered_frames(&notice.backtrace));
        }
        out.push('\n');
    }

    out
}

/// Backtrace frames as a 1-indexed list, one frame per line.
#[must_use]
pub fn numbered_frames(frames: &[BacktraceFrame]) -> String {
    frames
        .iter()
        .enumerate()
        .map(|(index, frame)| {
            format!(
                "{}. {}:{} in `{}`\n",
                index + 1,
                frame.file,
                frame.number,
                frame.method
            )
        })
        .collect()
}

fn state(fault: &Fault) -> &'static str {
    if fault.resolved { "Resolved" } else { "Unresolved" }
}

/// `Resolved` or `Unresolved`, with `, Ignored` appended for ignored faults.
pub(crate) fn status(fault: &Fault) -> String {
    if fault.ignored {
        format!("{}, Ignored", state(fault))
    } else {
        state(fault).to_string()
    }
}

/// The fault's environment, or "Not specified".
pub(crate) fn environment(fault: &Fault) -> &str {
    non_empty(fault.environment.as_deref()).unwrap_or(NOT_SPECIFIED)
}

pub(crate) fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.is_empty())
}

fn or_never(value: Option<&str>) -> &str {
    non_empty(value).unwrap_or("Never")
}

fn project_summary_lines(project: &Project) -> String {
    format!(
        "- Active: {}\n- Created at: {}\n- Environments: {}\n- Faults: {} ({} unresolved)\n- First notice at: {}\n- Last notice at: {}\n",
        if project.active { "Yes" } else { "No" },
        project.created_at.as_deref().unwrap_or_default(),
        project.environments.join(", "),
        project.fault_count,
        project.unresolved_fault_count,
        or_never(project.earliest_notice_at.as_deref()),
        or_never(project.last_notice_at.as_deref()),
    )
}
