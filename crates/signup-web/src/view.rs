//! HTML rendering for the month view.

use maud::{DOCTYPE, Markup, PreEscaped, html};
use signup_core::{DayCell, MonthGrid, MonthRef};

const WEEKDAYS: [&str; 7] = ["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"];

fn month_href(at: MonthRef) -> String {
  format!("/?month={}&year={}", at.month(), at.year())
}

/// Render the full page for `grid`.
pub fn month_page(grid: &MonthGrid) -> Markup {
  let title = format!("{} {}", grid.month_name(), grid.year());

  html! {
    (DOCTYPE)
    html lang="en" {
      head {
        meta charset="UTF-8";
        meta name="viewport" content="width=device-width, initial-scale=1.0";
        title { "Sign-ups · " (title) }
        style { (PreEscaped(CSS)) }
      }
      body {
        nav.month-nav {
          a.prev href=(month_href(grid.prev)) { "‹ Previous" }
          h1 { (title) }
          a.next href=(month_href(grid.next)) { "Next ›" }
        }
        table.calendar {
          thead {
            tr {
              @for name in WEEKDAYS {
                th { (name) }
              }
            }
          }
          tbody {
            @for week in grid.weeks() {
              tr {
                @for cell in week {
                  (day_cell(cell))
                }
              }
            }
          }
        }
        script { (PreEscaped(JAVASCRIPT)) }
      }
    }
  }
}

fn day_cell(cell: &DayCell) -> Markup {
  match cell {
    DayCell::Blank => html! { td.blank {} },
    DayCell::Day { day, date, names } => {
      let date = date.to_string();
      html! {
        td.day data-date=(date) {
          div.day-header {
            span.day-number { (day) }
            @if !names.is_empty() {
              span.count title="Signed up" { (names.len()) }
            }
          }
          ul.names {
            @for name in names {
              li {
                span.name { (name) }
                button.remove type="button" data-date=(date) data-name=(name) title="Remove" {
                  "×"
                }
              }
            }
          }
          form.signup method="post" action="/submit-name" {
            input type="hidden" name="date" value=(date);
            input type="text" name="name" placeholder="Name" required;
            button type="submit" { "+" }
          }
        }
      }
    }
  }
}

const CSS: &str = r#"
body { font-family: system-ui, sans-serif; margin: 0 auto; max-width: 1100px; padding: 1rem; }
.month-nav { display: flex; align-items: center; justify-content: space-between; }
.month-nav a { text-decoration: none; }
table.calendar { width: 100%; border-collapse: collapse; table-layout: fixed; }
table.calendar th { padding: .25rem; }
table.calendar td { border: 1px solid #ddd; vertical-align: top; height: 7rem; padding: .25rem; }
td.blank { background: #f6f6f6; }
.day-header { display: flex; justify-content: space-between; font-weight: 600; }
.count { background: #2b6cb0; color: #fff; border-radius: 1rem; padding: 0 .5rem; font-size: .8rem; }
ul.names { list-style: none; margin: .25rem 0; padding: 0; font-size: .9rem; }
ul.names li { display: flex; justify-content: space-between; }
button.remove { border: none; background: none; color: #c53030; cursor: pointer; }
form.signup { display: flex; gap: .25rem; }
form.signup input[type=text] { flex: 1; min-width: 0; }
"#;

const JAVASCRIPT: &str = r#"
document.querySelectorAll("form.signup").forEach((form) => {
  form.addEventListener("submit", async (event) => {
    event.preventDefault();
    const res = await fetch(form.action, { method: "POST", body: new URLSearchParams(new FormData(form)) });
    if (res.ok) { location.reload(); } else { alert((await res.json()).error); }
  });
});
document.querySelectorAll("button.remove").forEach((button) => {
  button.addEventListener("click", async () => {
    const res = await fetch("/remove-name", {
      method: "POST",
      headers: { "Content-Type": "application/json" },
      body: JSON.stringify({ date: button.dataset.date, name: button.dataset.name }),
    });
    if (res.ok) { location.reload(); } else { alert((await res.json()).error); }
  });
});
"#;
