// --- File: crates/schedulify_schedules/src/views.rs ---
//! HTML rendering for the schedule pages.

use axum::response::Html;
use schedulify_auth::SessionUser;
use schedulify_common::html::{escape, escape_multiline, page};
use schedulify_db::{AvailabilityCode, Schedule};
use std::fmt::Write;

use crate::logic::AvailabilityMatrix;

const UPDATED_AT_FORMAT: &str = "%Y/%m/%d %H:%M";

// Posts `data-next` for a cell and updates it from the JSON reply.
// NEXT and LABELS are filled in from AvailabilityCode.
const AVAILABILITY_SCRIPT: &str = r#"<script>
var NEXT = __NEXT__;
var LABELS = __LABELS__;
document.querySelectorAll('button.availability-toggle').forEach(function (button) {
  button.addEventListener('click', function () {
    var url = '/schedules/' + button.dataset.scheduleId + '/users/' + button.dataset.userId
      + '/candidates/' + button.dataset.candidateId;
    fetch(url, {
      method: 'POST',
      headers: { 'Content-Type': 'application/x-www-form-urlencoded' },
      body: 'availability=' + button.dataset.next
    }).then(function (res) { return res.json(); }).then(function (data) {
      button.dataset.availability = data.availability;
      button.dataset.next = NEXT[data.availability];
      button.textContent = LABELS[data.availability];
    });
  });
});
</script>"#;

fn availability_script() -> String {
    let next = AvailabilityCode::ALL
        .iter()
        .map(|c| c.next().code().to_string())
        .collect::<Vec<_>>()
        .join(",");
    let labels = AvailabilityCode::ALL
        .iter()
        .map(|c| format!("'{}'", c.label()))
        .collect::<Vec<_>>()
        .join(",");
    AVAILABILITY_SCRIPT
        .replace("__NEXT__", &format!("[{}]", next))
        .replace("__LABELS__", &format!("[{}]", labels))
}

pub fn index_page(user: Option<&SessionUser>, schedules: &[Schedule]) -> Html<String> {
    let Some(user) = user else {
        return page(
            "Schedulify",
            "<h1>Schedulify</h1>\n<p>予定を作って出欠を集めましょう。</p>\n<p><a href=\"/login\">ログイン</a></p>",
        );
    };

    let mut body = format!(
        "<h1>Schedulify</h1>\n<p>{} さん (<a href=\"/logout\">ログアウト</a>)</p>\n<p><a href=\"/schedules/new\">予定を作る</a></p>\n",
        escape(&user.username)
    );

    if schedules.is_empty() {
        body.push_str("<p>まだ予定はありません。</p>");
    } else {
        body.push_str("<table class=\"schedules\">\n<tr><th>予定名</th><th>更新日時</th></tr>\n");
        for schedule in schedules {
            let _ = writeln!(
                body,
                "<tr><td><a href=\"/schedules/{}\">{}</a></td><td>{}</td></tr>",
                escape(&schedule.schedule_id),
                escape(&schedule.schedule_name),
                schedule.updated_at.format(UPDATED_AT_FORMAT)
            );
        }
        body.push_str("</table>");
    }

    page("Schedulify", &body)
}

pub fn new_schedule_page() -> Html<String> {
    page(
        "予定の作成",
        r#"<h1>予定の作成</h1>
<form method="post" action="/schedules">
<p><label>予定名<br><input type="text" name="scheduleName" maxlength="255"></label></p>
<p><label>メモ<br><textarea name="memo" rows="4"></textarea></label></p>
<p><label>候補日程 (改行して複数入力)<br><textarea name="candidates" rows="6"></textarea></label></p>
<button type="submit">作成する</button>
</form>"#,
    )
}

pub fn schedule_page(
    schedule: &Schedule,
    owner_name: Option<&str>,
    viewer: Option<&SessionUser>,
    matrix: &AvailabilityMatrix,
) -> Html<String> {
    let mut body = format!(
        "<h1>{}</h1>\n<p class=\"memo\">{}</p>\n<p>作成者: {}</p>\n",
        escape(&schedule.schedule_name),
        escape_multiline(&schedule.memo),
        escape(owner_name.unwrap_or("(不明)"))
    );

    body.push_str("<ul class=\"candidates\">\n");
    for candidate in &matrix.candidates {
        let _ = writeln!(body, "<li>{}</li>", escape(&candidate.candidate_name));
    }
    body.push_str("</ul>\n");

    body.push_str("<table class=\"availabilities\">\n<tr><th>候補</th>");
    for user in &matrix.users {
        let _ = write!(body, "<th>{}</th>", escape(&user.username));
    }
    body.push_str("<th>出席</th></tr>\n");

    for candidate in &matrix.candidates {
        let _ = write!(body, "<tr><th>{}</th>", escape(&candidate.candidate_name));
        for user in &matrix.users {
            let code = matrix.get(user.user_id, candidate.candidate_id);
            if viewer.is_some_and(|v| v.id == user.user_id) {
                let _ = write!(
                    body,
                    "<td><button class=\"availability-toggle\" data-schedule-id=\"{}\" data-user-id=\"{}\" data-candidate-id=\"{}\" data-availability=\"{}\" data-next=\"{}\">{}</button></td>",
                    escape(&schedule.schedule_id),
                    user.user_id,
                    candidate.candidate_id,
                    code,
                    code.next(),
                    code.label()
                );
            } else {
                let _ = write!(body, "<td>{}</td>", code.label());
            }
        }
        let _ = writeln!(body, "<td>{}</td></tr>", matrix.present_count(candidate.candidate_id));
    }
    body.push_str("</table>\n");
    let _ = writeln!(body, "<p class=\"legend\">{}</p>", escape(&legend()));

    if viewer.is_some() {
        body.push_str(&availability_script());
    } else {
        body.push_str("<p><a href=\"/login\">ログイン</a>すると出欠を入力できます。</p>");
    }

    page(&schedule.schedule_name, &body)
}

/// Legend text shown for the codes, in code order.
pub fn legend() -> String {
    AvailabilityCode::ALL
        .iter()
        .map(|c| format!("{} = {}", c.label(), c.code()))
        .collect::<Vec<_>>()
        .join(", ")
}
