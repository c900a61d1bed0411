use maud::{DOCTYPE, Markup, html};

use crate::models::{Draft, EditDraft, Student};
use crate::state::{ConsoleSnapshot, Notification, NotificationKind};

const STYLE: &str = r#"
body { font-family: sans-serif; margin: 2rem; }
table { border-collapse: collapse; }
td, th { border: 1px solid #999; padding: 10px; }
.toast { padding: 8px 12px; margin-bottom: 6px; border-radius: 5px; color: white; }
.toast.success { background: #2f855a; }
.toast.error { background: #c53030; }
.pager { margin-top: 15px; text-align: center; }
.pager button { padding: 6px 12px; margin: 0 5px; background: #2b6cb0; color: white; border: none; border-radius: 5px; }
.pager button:disabled { background: #ccc; cursor: not-allowed; }
.loader { width: 32px; height: 32px; border: 4px solid #ddd; border-top-color: #2b6cb0; border-radius: 50%; animation: spin 1s linear infinite; }
@keyframes spin { to { transform: rotate(360deg); } }
"#;

pub fn render_page(snapshot: &ConsoleSnapshot) -> Markup {
    html! {
        (DOCTYPE)
        html {
            head {
                meta charset="UTF-8";
                meta name="viewport" content="width=device-width, initial-scale=1.0";
                title { "Student Management System" }
                style { (maud::PreEscaped(STYLE)) }
            }
            body {
                h1 { "🎓 Student Management System" }
                (render_notifications(&snapshot.notifications))
                (render_add_form(&snapshot.add_draft))
                (render_search(&snapshot.search_term))
                h2 { "Student List" }
                @if snapshot.loading {
                    div class="spinner" { div class="loader" {} }
                } @else if snapshot.rows.is_empty() {
                    p { "No students found." }
                } @else {
                    (render_table(&snapshot.rows, snapshot.editing.as_ref()))
                    (render_pager(snapshot))
                }
            }
        }
    }
}

fn render_notifications(notifications: &[Notification]) -> Markup {
    html! {
        div class="toasts" {
            @for n in notifications {
                @let class = match n.kind {
                    NotificationKind::Success => "toast success",
                    NotificationKind::Error => "toast error",
                };
                div class=(class) {
                    (n.message)
                    form method="post" action={ "/notifications/" (n.id.to_string()) "/dismiss" } style="display:inline" {
                        button type="submit" { "×" }
                    }
                }
            }
        }
    }
}

fn render_add_form(draft: &Draft) -> Markup {
    html! {
        div {
            h2 { "Add New Student" }
            form method="post" action="/students" {
                input type="text" name="name" placeholder="Name" value=(draft.name) required;
                input type="number" name="age" placeholder="Age" min="0" value=(draft.age) required;
                input type="email" name="email" placeholder="Email" value=(draft.email) required;
                input type="text" name="course" placeholder="Course" value=(draft.course) required;
                button type="submit" { "Add Student" }
            }
        }
    }
}

fn render_search(term: &str) -> Markup {
    html! {
        form method="post" action="/search" style="margin-bottom: 10px" {
            input type="text" name="term" placeholder="Search by name or course" value=(term);
            button type="submit" { "Search" }
        }
    }
}

fn render_table(rows: &[Student], editing: Option<&EditDraft>) -> Markup {
    html! {
        table {
            thead {
                tr {
                    th { "ID" } th { "Name" } th { "Age" } th { "Email" } th { "Course" } th { "Actions" }
                }
            }
            tbody {
                @for student in rows {
                    @match editing.filter(|e| e.id == student.id) {
                        Some(edit) => { (render_edit_row(student, &edit.draft)) }
                        None => { (render_row(student)) }
                    }
                }
            }
        }
    }
}

fn render_row(student: &Student) -> Markup {
    html! {
        tr {
            td { (student.id.to_string()) }
            td { (student.name) }
            td { (student.age) }
            td { (student.email) }
            td { (student.course) }
            td {
                form method="post" action={ "/students/" (student.id.to_string()) "/edit" } style="display:inline" {
                    button type="submit" { "Edit" }
                }
                form method="post" action={ "/students/" (student.id.to_string()) "/delete" } style="display:inline" {
                    button type="submit" { "Delete" }
                }
            }
        }
    }
}

// Inputs sit outside the form element and join it via the `form` attribute.
fn render_edit_row(student: &Student, draft: &Draft) -> Markup {
    let form_id = format!("edit-{}", student.id);
    html! {
        tr {
            td { (student.id.to_string()) }
            td { input name="name" form=(form_id) value=(draft.name); }
            td { input name="age" form=(form_id) value=(draft.age); }
            td { input name="email" form=(form_id) value=(draft.email); }
            td { input name="course" form=(form_id) value=(draft.course); }
            td {
                form id=(form_id) method="post" action={ "/students/" (student.id.to_string()) "/save" } style="display:inline" {
                    button type="submit" { "Save" }
                }
                form method="post" action="/edit/cancel" style="display:inline" {
                    button type="submit" { "Cancel" }
                }
            }
        }
    }
}

fn render_pager(snapshot: &ConsoleSnapshot) -> Markup {
    html! {
        div class="pager" {
            form method="post" action="/page/prev" style="display:inline" {
                button type="submit" disabled[!snapshot.has_previous] { "◀ Previous" }
            }
            span style="margin: 0 10px" {
                "Page " (snapshot.page) " of " (snapshot.total_pages)
            }
            form method="post" action="/page/next" style="display:inline" {
                button type="submit" disabled[!snapshot.has_next] { "Next ▶" }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::StudentId;

    fn snapshot_with(rows: Vec<Student>) -> ConsoleSnapshot {
        ConsoleSnapshot {
            total_matches: rows.len(),
            rows,
            page: 1,
            total_pages: 1,
            has_next: false,
            has_previous: false,
            search_term: String::new(),
            loading: false,
            add_draft: Draft::default(),
            editing: None,
            notifications: Vec::new(),
        }
    }

    fn ana() -> Student {
        Student {
            id: StudentId::Number(1),
            name: "Ana <script>".to_string(),
            age: 20,
            email: "ana@uni.edu".to_string(),
            course: "Math".to_string(),
        }
    }

    #[test]
    fn escapes_student_fields() {
        let html = render_page(&snapshot_with(vec![ana()])).into_string();
        assert!(html.contains("Ana &lt;script&gt;"));
        assert!(html.contains("Page 1 of 1"));
    }

    #[test]
    fn empty_page_says_no_students() {
        let html = render_page(&snapshot_with(Vec::new())).into_string();
        assert!(html.contains("No students found."));
        assert!(!html.contains("<table>"));
    }

    #[test]
    fn edited_row_renders_inputs() {
        let student = ana();
        let mut snapshot = snapshot_with(vec![student.clone()]);
        snapshot.editing = Some(EditDraft {
            id: student.id.clone(),
            draft: Draft::from_student(&student),
        });
        let html = render_page(&snapshot).into_string();
        assert!(html.contains(r#"action="/students/1/save""#));
        assert!(!html.contains(r#"action="/students/1/delete""#));
    }
}
