//! Server-side HTML for the single page: the resume card, and while editing
//! the form beside it.
//!
//! Every form input is named by its dotted field path so a post maps straight
//! onto `Editor::apply_form`. Add/Remove/Cancel are buttons of the same form
//! with their own `formaction`, so typed values travel with them.

use crate::editor::Editor;
use crate::models::resume::{
    EducationField, ExperienceField, FieldPath, ListName, ResumeRecord,
};

const STYLE: &str = "\
body{font-family:system-ui,sans-serif;margin:0;background:#f5f5f5;color:#222}\
.row-container{display:flex;gap:20px;padding:20px;flex-wrap:wrap}\
.col{flex:1 1 0;min-width:320px}\
.resume-card,.form-card{background:#fff;border-radius:8px;padding:24px;box-shadow:0 1px 3px rgba(0,0,0,.15)}\
.resume-name{margin:0 0 4px}\
.resume-section,.form-section{border-bottom:1px solid #ddd;padding-bottom:4px}\
.resume-item,.form-item{margin-bottom:12px}\
.resume-item p{margin:2px 0}\
.resume-degree,.resume-title{font-weight:600}\
.resume-skill{display:inline-block;background:#e6f0ff;border-radius:4px;padding:2px 8px;margin:0 6px 6px 0}\
.form-item label{display:block;font-size:.85em;margin-top:6px}\
.form-item input{width:100%;box-sizing:border-box;padding:4px 8px}\
.notice{background:#fff3cd;border:1px solid #ffe08a;padding:8px 12px;margin:20px 20px 0;border-radius:4px}\
";

/// Escapes text for element content and double-quoted attribute values.
pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// Renders the full page for the editor's current mode.
pub fn render_page(editor: &Editor, notice: Option<&str>) -> String {
    let record = editor.record();
    let mut html = String::from("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n");
    html.push_str("<meta charset=\"utf-8\">\n");
    html.push_str(&format!("<title>{} - Resume</title>\n", escape(&record.name)));
    html.push_str(&format!("<style>{STYLE}</style>\n"));
    html.push_str("</head>\n<body>\n<div class=\"resume-maker\">\n");

    if let Some(notice) = notice {
        html.push_str(&format!(
            "<div class=\"notice\" role=\"alert\">{}</div>\n",
            escape(notice)
        ));
    }

    html.push_str("<div class=\"row-container\">\n");
    if let Some(draft) = editor.draft() {
        html.push_str("<div class=\"col\">\n");
        html.push_str(&render_form(draft));
        html.push_str("</div>\n");
    }
    html.push_str("<div class=\"col\">\n");
    html.push_str(&render_resume(record));
    html.push_str("</div>\n</div>\n</div>\n</body>\n</html>\n");
    html
}

/// The read-only resume card, including the Edit toggle.
pub fn render_resume(record: &ResumeRecord) -> String {
    let mut html = String::from("<div class=\"resume-card\">\n");
    html.push_str(&format!(
        "<h1 class=\"resume-name\">{}</h1>\n",
        escape(&record.name)
    ));
    html.push_str(&format!(
        "<p class=\"resume-contact\">{}</p>\n",
        escape(&record.contact)
    ));
    html.push_str(&format!(
        "<p class=\"resume-address\">{}</p>\n",
        escape(&record.address)
    ));

    html.push_str("<h2 class=\"resume-section\">Education</h2>\n");
    for edu in &record.education {
        html.push_str("<div class=\"resume-item\">\n");
        html.push_str(&format!(
            "<p class=\"resume-degree\">{}</p>\n",
            escape(&edu.degree)
        ));
        html.push_str(&format!(
            "<p class=\"resume-institution\">{}</p>\n",
            escape(&edu.institution)
        ));
        html.push_str(&format!(
            "<p class=\"resume-year\">{}</p>\n",
            escape(&edu.year)
        ));
        html.push_str("</div>\n");
    }

    html.push_str("<h2 class=\"resume-section\">Experience</h2>\n");
    for exp in &record.experience {
        html.push_str("<div class=\"resume-item\">\n");
        for (class, value) in [
            ("resume-title", &exp.title),
            ("resume-company", &exp.company),
            ("resume-duration", &exp.duration),
            ("resume-description", &exp.description),
        ] {
            html.push_str(&format!("<p class=\"{class}\">{}</p>\n", escape(value)));
        }
        html.push_str("</div>\n");
    }

    html.push_str("<h2 class=\"resume-section\">Skills</h2>\n<div class=\"resume-skills\">\n");
    for skill in &record.skills {
        html.push_str(&format!(
            "<span class=\"resume-skill\">{}</span>\n",
            escape(skill)
        ));
    }
    html.push_str("</div>\n");

    html.push_str(
        "<form method=\"post\" action=\"/toggle\">\
         <button type=\"submit\" class=\"resume-edit-button\">Edit</button></form>\n",
    );
    html.push_str("</div>\n");
    html
}

fn text_input(html: &mut String, label: &str, path: FieldPath, value: &str) {
    let name = path.to_string();
    html.push_str(&format!("<label for=\"{name}\">{label}</label>\n"));
    html.push_str(&format!(
        "<input id=\"{name}\" name=\"{name}\" type=\"text\" value=\"{}\">\n",
        escape(value)
    ));
}

fn remove_button(html: &mut String, list: ListName, index: usize) {
    html.push_str(&format!(
        "<button type=\"submit\" class=\"form-remove-button\" \
         formaction=\"/form/items/{list}/{index}/remove\">Remove</button>\n"
    ));
}

fn add_button(html: &mut String, list: ListName) {
    html.push_str(&format!(
        "<button type=\"submit\" class=\"form-add-button\" \
         formaction=\"/form/items/{list}/add\">Add More</button>\n"
    ));
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        None => String::new(),
        Some(first) => first.to_uppercase().to_string() + chars.as_str(),
    }
}

/// The edit form over `draft`.
pub fn render_form(draft: &ResumeRecord) -> String {
    let mut html = String::from("<div class=\"form-card\">\n");
    html.push_str("<form class=\"form\" method=\"post\" action=\"/form/submit\">\n");

    html.push_str("<h2 class=\"form-section\">Personal Details</h2>\n");
    for (label, path, value) in [
        ("Name", FieldPath::Name, &draft.name),
        ("Contact", FieldPath::Contact, &draft.contact),
        ("Address", FieldPath::Address, &draft.address),
    ] {
        html.push_str("<div class=\"form-item\">\n");
        text_input(&mut html, label, path, value);
        html.push_str("</div>\n");
    }

    html.push_str("<h2 class=\"form-section\">Education</h2>\n");
    for (index, edu) in draft.education.iter().enumerate() {
        html.push_str("<div class=\"form-item\">\n");
        for field in EducationField::ALL {
            let label = capitalize(field.as_str());
            text_input(
                &mut html,
                &label,
                FieldPath::Education { index, field },
                edu.field(field),
            );
        }
        remove_button(&mut html, ListName::Education, index);
        html.push_str("</div>\n");
    }
    add_button(&mut html, ListName::Education);

    html.push_str("<h2 class=\"form-section\">Experience</h2>\n");
    for (index, exp) in draft.experience.iter().enumerate() {
        html.push_str("<div class=\"form-item\">\n");
        for field in ExperienceField::ALL {
            let label = capitalize(field.as_str());
            text_input(
                &mut html,
                &label,
                FieldPath::Experience { index, field },
                exp.field(field),
            );
        }
        remove_button(&mut html, ListName::Experience, index);
        html.push_str("</div>\n");
    }
    add_button(&mut html, ListName::Experience);

    html.push_str("<h2 class=\"form-section\">Skills</h2>\n");
    for (index, skill) in draft.skills.iter().enumerate() {
        html.push_str("<div class=\"form-item\">\n");
        text_input(&mut html, "Skill", FieldPath::Skill { index }, skill);
        remove_button(&mut html, ListName::Skills, index);
        html.push_str("</div>\n");
    }
    add_button(&mut html, ListName::Skills);

    html.push_str(
        "<div class=\"form-actions\">\n\
         <button type=\"submit\" class=\"form-submit-button\">Submit</button>\n\
         <button type=\"submit\" class=\"form-cancel-button\" formaction=\"/form/cancel\">Cancel</button>\n\
         </div>\n",
    );
    html.push_str("</form>\n</div>\n");
    html
}
