//! Table layout for `arbor list`.

use anstyle::Style;

use arbor::git::RemoteSyncState;
use arbor::path::format_path_for_display;
use arbor::styling::{
    ADDITION, CURRENT, DELETION, HINT, WARNING, pad_to, truncate_to_width, visual_width,
};
use arbor::worktree::WorktreeInfo;

const HEADERS: [&str; 6] = ["BRANCH", "PATH", "HEAD", "STATUS", "AGE", "SUBJECT"];

/// Widest subject shown before truncation.
const SUBJECT_WIDTH: usize = 50;

const CURRENT_MARKER: &str = "@";
const PRIMARY_MARKER: &str = "^";

fn styled(style: Style, text: &str) -> String {
    format!("{style}{text}{style:#}")
}

fn sync_cell(sync: RemoteSyncState) -> Option<String> {
    let style = match sync {
        RemoteSyncState::NoRemote => return None,
        RemoteSyncState::Synced => Style::new(),
        RemoteSyncState::Ahead => ADDITION,
        RemoteSyncState::Behind => DELETION,
        RemoteSyncState::Diverged => WARNING,
    };
    Some(styled(style, &format!("{} {sync}", sync.symbol())))
}

/// Status flags: local changes, remote comparison and git's own markers.
fn status_cell(info: &WorktreeInfo) -> String {
    let mut parts = Vec::new();
    if info.dirty {
        parts.push(styled(WARNING, "dirty"));
    }
    if let Some(sync) = sync_cell(info.sync) {
        parts.push(sync);
    }
    if info.worktree.prunable.is_some() {
        parts.push(styled(DELETION, "prunable"));
    }
    if info.worktree.locked.is_some() {
        parts.push(styled(HINT, "locked"));
    }
    parts.join(", ")
}

fn row(info: &WorktreeInfo) -> [String; 6] {
    let wt = &info.worktree;
    let marker = if wt.current {
        CURRENT_MARKER
    } else if wt.primary {
        PRIMARY_MARKER
    } else {
        " "
    };
    let branch = format!("{marker} {}", wt.branch_label());
    let branch = if wt.current {
        styled(CURRENT, &branch)
    } else if wt.detached {
        styled(HINT, &branch)
    } else {
        branch
    };

    let subject = info
        .subject
        .as_deref()
        .map(|s| truncate_to_width(s, SUBJECT_WIDTH))
        .unwrap_or_default();

    [
        branch,
        format_path_for_display(&wt.path),
        styled(HINT, wt.short_head()),
        status_cell(info),
        info.relative_time.clone(),
        subject,
    ]
}

/// Render the listing as aligned lines, header first.
pub(crate) fn render_listing(infos: &[WorktreeInfo]) -> Vec<String> {
    // Header gets the same two-column indent as the row markers
    let header: [String; 6] = std::array::from_fn(|i| match i {
        0 => format!("  {}", HEADERS[0]),
        _ => HEADERS[i].to_string(),
    });
    let rows: Vec<[String; 6]> = infos.iter().map(row).collect();

    let mut widths = [0usize; 6];
    for cells in std::iter::once(&header).chain(rows.iter()) {
        for (width, cell) in widths.iter_mut().zip(cells) {
            *width = (*width).max(visual_width(cell));
        }
    }

    let format_line = |cells: &[String; 6], style: Option<Style>| {
        let mut line = String::new();
        for (i, cell) in cells.iter().enumerate() {
            if i + 1 == cells.len() {
                line.push_str(cell);
            } else {
                line.push_str(&pad_to(cell, widths[i]));
                line.push_str("  ");
            }
        }
        let line = line.trim_end().to_string();
        match style {
            Some(style) => styled(style, &line),
            None => line,
        }
    };

    std::iter::once(format_line(&header, Some(HINT)))
        .chain(rows.iter().map(|cells| format_line(cells, None)))
        .collect()
}
