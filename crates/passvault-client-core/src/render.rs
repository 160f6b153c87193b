use maud::{Markup, html};

use crate::models::{PasswordEntry, UserAccount};

pub const ACTION_COPY_PASSWORD: &str = "copy-password";
pub const ACTION_DELETE_PASSWORD: &str = "delete-password";
pub const ACTION_DELETE_USER: &str = "delete-user";

pub const EMPTY_PASSWORDS_TEXT: &str = "No saved passwords";
pub const EMPTY_USERS_TEXT: &str = "No users";
pub const CURRENT_ACCOUNT_TEXT: &str = "(current account)";

/// HTML fragment for the password container. Every server-provided value is
/// escaped by `maud`.
#[must_use]
pub fn render_password_list(entries: &[PasswordEntry]) -> String {
    password_list_markup(entries).into_string()
}

fn password_list_markup(entries: &[PasswordEntry]) -> Markup {
    html! {
        @if entries.is_empty() {
            p class="pv-empty" { (EMPTY_PASSWORDS_TEXT) }
        } @else {
            @for entry in entries {
                div class="pv-entry" data-id=(entry.id) {
                    strong class="pv-entry-service" { (entry.service) }
                    br;
                    "Login: " span class="pv-entry-username" { (entry.username) }
                    br;
                    "Password: " span class="pv-entry-password" id={"pwd-" (entry.id)} { (entry.password) }
                    button type="button" class="pv-btn" data-action=(ACTION_COPY_PASSWORD) data-id=(entry.id) { "Copy" }
                    button type="button" class="pv-btn delete-btn" data-action=(ACTION_DELETE_PASSWORD) data-id=(entry.id) { "Delete" }
                }
            }
        }
    }
}

/// HTML fragment for the admin user container. The row matching
/// `current_subject` is marked and gets no delete control.
#[must_use]
pub fn render_user_list(users: &[UserAccount], current_subject: Option<&str>) -> String {
    let markup = html! {
        @if users.is_empty() {
            p class="pv-empty" { (EMPTY_USERS_TEXT) }
        } @else {
            @for user in users {
                div class="pv-user" data-id=(user.id) {
                    strong { (user.username) }
                    @if user.is_admin {
                        " " span class="admin-badge" { "Admin" }
                    }
                    " "
                    @if is_current_account(user, current_subject) {
                        span class="pv-current-account" { (CURRENT_ACCOUNT_TEXT) }
                    } @else {
                        button type="button" class="pv-btn delete-btn" data-action=(ACTION_DELETE_USER) data-id=(user.id) { "Delete" }
                    }
                }
            }
        }
    };
    markup.into_string()
}

#[must_use]
pub fn is_current_account(user: &UserAccount, current_subject: Option<&str>) -> bool {
    current_subject.is_some_and(|subject| subject == user.username)
}

/// Plain-text table for terminal front-ends.
#[must_use]
pub fn render_password_table(entries: &[PasswordEntry], reveal: bool) -> String {
    if entries.is_empty() {
        return format!("{EMPTY_PASSWORDS_TEXT}\n");
    }
    let rows = entries
        .iter()
        .map(|entry| {
            vec![
                entry.id.to_string(),
                entry.service.clone(),
                entry.username.clone(),
                if reveal {
                    entry.password.clone()
                } else {
                    "********".to_string()
                },
            ]
        })
        .collect::<Vec<_>>();
    text_table(&["ID", "SERVICE", "USERNAME", "PASSWORD"], &rows)
}

#[must_use]
pub fn render_user_table(users: &[UserAccount], current_subject: Option<&str>) -> String {
    if users.is_empty() {
        return format!("{EMPTY_USERS_TEXT}\n");
    }
    let rows = users
        .iter()
        .map(|user| {
            let mut notes = Vec::new();
            if user.is_admin {
                notes.push("admin");
            }
            if is_current_account(user, current_subject) {
                notes.push("current");
            }
            vec![user.id.to_string(), user.username.clone(), notes.join(", ")]
        })
        .collect::<Vec<_>>();
    text_table(&["ID", "USERNAME", "NOTES"], &rows)
}

fn text_table(headers: &[&str], rows: &[Vec<String>]) -> String {
    let mut widths = headers
        .iter()
        .map(|header| header.chars().count())
        .collect::<Vec<_>>();
    for row in rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let mut output = String::new();
    let header_cells = headers.iter().map(|header| (*header).to_string()).collect::<Vec<_>>();
    push_row(&mut output, &header_cells, &widths);
    for row in rows {
        push_row(&mut output, row, &widths);
    }
    output
}

fn push_row(output: &mut String, cells: &[String], widths: &[usize]) {
    let line = cells
        .iter()
        .zip(widths)
        .map(|(cell, width)| {
            let padding = width.saturating_sub(cell.chars().count());
            format!("{cell}{}", " ".repeat(padding))
        })
        .collect::<Vec<_>>()
        .join("  ");
    output.push_str(line.trim_end());
    output.push('\n');
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(id: i64, service: &str) -> PasswordEntry {
        PasswordEntry {
            id,
            service: service.to_string(),
            username: "alice".to_string(),
            password: "pw".to_string(),
        }
    }

    fn user(id: i64, username: &str, is_admin: bool) -> UserAccount {
        UserAccount {
            id,
            username: username.to_string(),
            is_admin,
        }
    }

    #[test]
    fn empty_password_list_renders_placeholder() {
        assert!(render_password_list(&[]).contains(EMPTY_PASSWORDS_TEXT));
    }

    #[test]
    fn password_list_carries_action_hooks() {
        let html = render_password_list(&[entry(5, "mail")]);
        assert!(html.contains(r#"data-action="copy-password" data-id="5""#));
        assert!(html.contains(r#"data-action="delete-password" data-id="5""#));
        assert!(html.contains(r#"id="pwd-5""#));
        assert!(html.contains("mail"));
    }

    #[test]
    fn password_list_escapes_server_values() {
        let html = render_password_list(&[entry(1, "<script>alert(1)</script>")]);
        assert!(!html.contains("<script>"));
        assert!(html.contains("&lt;script&gt;"));
    }

    #[test]
    fn user_list_marks_current_account_and_admins() {
        let html = render_user_list(
            &[user(1, "root", true), user(2, "bob", false)],
            Some("root"),
        );
        assert!(html.contains("admin-badge"));
        assert!(html.contains(CURRENT_ACCOUNT_TEXT));
        assert!(!html.contains(r#"data-action="delete-user" data-id="1""#));
        assert!(html.contains(r#"data-action="delete-user" data-id="2""#));
    }

    #[test]
    fn user_list_without_subject_offers_delete_everywhere() {
        let html = render_user_list(&[user(1, "root", true)], None);
        assert!(html.contains(r#"data-action="delete-user" data-id="1""#));
        assert!(render_user_list(&[], None).contains(EMPTY_USERS_TEXT));
    }

    #[test]
    fn password_table_masks_unless_revealed() {
        let masked = render_password_table(&[entry(1, "mail")], false);
        assert!(masked.contains("********"));
        assert!(!masked.contains(" pw"));
        let revealed = render_password_table(&[entry(1, "mail")], true);
        assert!(revealed.lines().nth(1).is_some_and(|line| line.ends_with("pw")));
    }

    #[test]
    fn user_table_lists_notes() {
        let table = render_user_table(&[user(1, "root", true)], Some("root"));
        assert!(table.contains("admin, current"));
    }
}
