//! Portfolio templates as data, and the one serializer that renders them.
//!
//! A template is a `TemplateDescriptor`: a class prefix, the five section
//! descriptors, and a handful of style knobs. `render_fragment` walks the
//! descriptor and the document and produces the `<body>` contents shared by
//! the live preview and the static export.

use std::fmt;

use serde::Serialize;

use crate::models::portfolio::{Education, Experience, PortfolioDocument, Project};
use crate::render::sections::SectionId;

const PLACEHOLDER_NAME: &str = "Your Name";
const PLACEHOLDER_TITLE: &str = "Your Title";
const PLACEHOLDER_EMAIL: &str = "your.email@example.com";
const PLACEHOLDER_PHONE: &str = "+1 (555) 123-4567";
const PLACEHOLDER_LOCATION: &str = "Your Location";
pub const PLACEHOLDER_ABOUT: &str = "Your professional bio will appear here.";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Template {
    Aurora,
    Nebula,
    #[default]
    Spark,
}

impl Template {
    pub const ALL: [Template; 3] = [Template::Aurora, Template::Nebula, Template::Spark];

    /// Unknown ids fall back to Spark.
    pub fn from_id(id: &str) -> Self {
        match id.trim().to_ascii_lowercase().as_str() {
            "aurora" => Template::Aurora,
            "nebula" => Template::Nebula,
            _ => Template::Spark,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Template::Aurora => "aurora",
            Template::Nebula => "nebula",
            Template::Spark => "spark",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Template::Aurora => "Aurora",
            Template::Nebula => "Nebula",
            Template::Spark => "Spark",
        }
    }

    pub fn descriptor(&self) -> &'static TemplateDescriptor {
        match self {
            Template::Aurora => &AURORA,
            Template::Nebula => &NEBULA,
            Template::Spark => &SPARK,
        }
    }
}

impl fmt::Display for Template {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SectionDescriptor {
    pub id: SectionId,
    pub title: &'static str,
    /// Alternate background band.
    pub alt: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeaderStyle {
    /// Name, title, contact row and text social links.
    Classic,
    /// Greeting hero with floating badges; the bio is repeated in the header.
    Hero,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum YearStyle {
    Graduated,
    Bare,
    ClassOf,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProjectMark {
    None,
    CodeIcon,
    /// The project's emoji, or the fallback when it has none.
    Emoji(&'static str),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FooterStyle {
    AllRightsReserved { rule: bool },
    MadeWith,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemplateDescriptor {
    pub template: Template,
    pub class_prefix: &'static str,
    pub sections: [SectionDescriptor; 5],
    pub header: HeaderStyle,
    /// Accent bar before section titles.
    pub title_accent: bool,
    /// Separator between company/school and location. `None` omits location.
    pub location_separator: Option<&'static str>,
    pub education_year: YearStyle,
    pub show_gpa: bool,
    /// Draw a connector line on every timeline item except the last.
    pub timeline_connector: bool,
    pub project_mark: ProjectMark,
    pub footer: FooterStyle,
}

const fn section(id: SectionId, title: &'static str, alt: bool) -> SectionDescriptor {
    SectionDescriptor { id, title, alt }
}

pub static AURORA: TemplateDescriptor = TemplateDescriptor {
    template: Template::Aurora,
    class_prefix: "aurora",
    sections: [
        section(SectionId::About, "About Me", false),
        section(SectionId::Skills, "Skills", false),
        section(SectionId::Experience, "Experience", false),
        section(SectionId::Projects, "Projects", false),
        section(SectionId::Education, "Education", false),
    ],
    header: HeaderStyle::Classic,
    title_accent: false,
    location_separator: Some("•"),
    education_year: YearStyle::Graduated,
    show_gpa: false,
    timeline_connector: false,
    project_mark: ProjectMark::None,
    footer: FooterStyle::AllRightsReserved { rule: false },
};

pub static NEBULA: TemplateDescriptor = TemplateDescriptor {
    template: Template::Nebula,
    class_prefix: "nebula",
    sections: [
        section(SectionId::About, "About Me", false),
        section(SectionId::Skills, "Skills", false),
        section(SectionId::Experience, "Experience", false),
        section(SectionId::Projects, "Projects", false),
        section(SectionId::Education, "Education", false),
    ],
    header: HeaderStyle::Classic,
    title_accent: true,
    location_separator: None,
    education_year: YearStyle::Bare,
    show_gpa: false,
    timeline_connector: true,
    project_mark: ProjectMark::CodeIcon,
    footer: FooterStyle::AllRightsReserved { rule: true },
};

pub static SPARK: TemplateDescriptor = TemplateDescriptor {
    template: Template::Spark,
    class_prefix: "spark",
    sections: [
        section(SectionId::About, "About", false),
        section(SectionId::Skills, "Superpowers", true),
        section(SectionId::Experience, "Journey", false),
        section(SectionId::Projects, "Projects", true),
        section(SectionId::Education, "Education", false),
    ],
    header: HeaderStyle::Hero,
    title_accent: false,
    location_separator: Some("·"),
    education_year: YearStyle::ClassOf,
    show_gpa: true,
    timeline_connector: false,
    project_mark: ProjectMark::Emoji("🚀"),
    footer: FooterStyle::MadeWith,
};

const CODE_ICON_SVG: &str = r#"<svg fill="none" stroke="currentColor" viewBox="0 0 24 24"><path stroke-linecap="round" stroke-linejoin="round" stroke-width="2" d="M10 20l4-16m4 4l4 4-4 4M6 16l-4-4 4-4" /></svg>"#;

/// Escapes text for both element content and quoted attribute values.
pub fn escape_html(text: &str) -> String {
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

fn or_placeholder<'a>(value: &'a str, placeholder: &'a str) -> &'a str {
    if value.trim().is_empty() {
        placeholder
    } else {
        value
    }
}

/// Whether a section has anything to show. About always renders.
pub fn section_has_content(id: SectionId, doc: &PortfolioDocument) -> bool {
    match id {
        SectionId::About => true,
        SectionId::Skills => !doc.skills.is_empty(),
        SectionId::Experience => !doc.experience.is_empty(),
        SectionId::Projects => !doc.projects.is_empty(),
        SectionId::Education => !doc.education.is_empty(),
    }
}

/// Header strings with placeholders applied, already escaped.
struct Identity {
    name: String,
    title: String,
    email: String,
    phone: String,
    location: String,
    about: String,
}

impl Identity {
    fn of(doc: &PortfolioDocument) -> Self {
        let p = &doc.personal;
        Self {
            name: escape_html(or_placeholder(&p.name, PLACEHOLDER_NAME)),
            title: escape_html(or_placeholder(&p.title, PLACEHOLDER_TITLE)),
            email: escape_html(or_placeholder(&p.email, PLACEHOLDER_EMAIL)),
            phone: escape_html(or_placeholder(&p.phone, PLACEHOLDER_PHONE)),
            location: escape_html(or_placeholder(&p.location, PLACEHOLDER_LOCATION)),
            about: escape_html(or_placeholder(&doc.about, PLACEHOLDER_ABOUT)),
        }
    }
}

/// Renders the page body for `template`. The footer year is an input so the
/// output is a pure function of its arguments.
pub fn render_fragment(template: Template, doc: &PortfolioDocument, year: i32) -> String {
    let d = template.descriptor();
    let p = d.class_prefix;
    let who = Identity::of(doc);

    let mut out = String::new();
    out.push_str(&format!("<div class=\"{p}-template\">\n"));
    render_nav(&mut out, d, &who);
    match d.header {
        HeaderStyle::Classic => render_classic_header(&mut out, p, doc, &who),
        HeaderStyle::Hero => render_hero_header(&mut out, p, doc, &who),
    }

    out.push_str(&format!("<main class=\"{p}-main\">\n"));
    for section in &d.sections {
        if section_has_content(section.id, doc) {
            render_section(&mut out, d, section, doc, &who);
        }
    }
    out.push_str("</main>\n");

    render_footer(&mut out, d, &who, year);
    out.push_str("</div>\n");
    out
}

fn render_nav(out: &mut String, d: &TemplateDescriptor, who: &Identity) {
    let p = d.class_prefix;
    out.push_str(&format!(
        "<nav class=\"{p}-nav\">\n<div class=\"{p}-nav-content\">\n<span class=\"{p}-nav-name\">{}</span>\n<div class=\"{p}-nav-links\">\n",
        who.name
    ));
    for section in &d.sections {
        let id = section.id.as_str();
        out.push_str(&format!(
            "<a href=\"#{id}\" class=\"{p}-nav-link\" data-section-link=\"{id}\">{}</a>\n",
            section.id.nav_label()
        ));
    }
    out.push_str("</div>\n</div>\n</nav>\n");
}

fn social_links(doc: &PortfolioDocument) -> Vec<(&'static str, String)> {
    let p = &doc.personal;
    [("LinkedIn", &p.linkedin), ("GitHub", &p.github), ("Website", &p.website)]
        .into_iter()
        .filter(|(_, url)| !url.trim().is_empty())
        .map(|(label, url)| (label, escape_html(&format!("https://{}", url.trim()))))
        .collect()
}

fn render_classic_header(out: &mut String, p: &str, doc: &PortfolioDocument, who: &Identity) {
    out.push_str(&format!(
        "<header class=\"{p}-header\">\n<div class=\"{p}-header-content\">\n\
         <h1 class=\"{p}-name\">{name}</h1>\n<p class=\"{p}-title\">{title}</p>\n\
         <div class=\"{p}-contact-links\">\n\
         <a href=\"mailto:{email}\" class=\"{p}-link\">{email}</a>\n\
         <a href=\"tel:{phone}\" class=\"{p}-link\">{phone}</a>\n\
         <span class=\"{p}-link\">{location}</span>\n</div>\n",
        name = who.name,
        title = who.title,
        email = who.email,
        phone = who.phone,
        location = who.location,
    ));
    out.push_str(&format!("<div class=\"{p}-social-links\">\n"));
    for (label, url) in social_links(doc) {
        out.push_str(&format!(
            "<a href=\"{url}\" target=\"_blank\" rel=\"noopener noreferrer\" class=\"{p}-social-link\">{label}</a>\n"
        ));
    }
    out.push_str("</div>\n</div>\n</header>\n");
}

fn render_hero_header(out: &mut String, p: &str, doc: &PortfolioDocument, who: &Identity) {
    out.push_str(&format!(
        "<header class=\"{p}-header\">\n<div class=\"{p}-header-bg\"></div>\n\
         <div class=\"{p}-floating-badge {p}-badge-1\">🚀 Creative</div>\n\
         <div class=\"{p}-floating-badge {p}-badge-2\">✨ Designer</div>\n\
         <div class=\"{p}-floating-badge {p}-badge-3\">💡 Innovator</div>\n\
         <div class=\"{p}-header-content\">\n<div class=\"{p}-hello\">Hi there! :)</div>\n\
         <h1 class=\"{p}-name\">I'm <span class=\"underline\">{name}</span>.</h1>\n\
         <p class=\"{p}-title\"><span class=\"{p}-status-dot\"></span>{title}</p>\n\
         <p class=\"{p}-about-text\">{about}</p>\n\
         <div class=\"{p}-social-links\">\n\
         <a href=\"mailto:{email}\" class=\"{p}-social-link\">✉ Get in touch</a>\n",
        name = who.name,
        title = who.title,
        about = who.about,
        email = who.email,
    ));
    for (label, url) in social_links(doc) {
        out.push_str(&format!(
            "<a href=\"{url}\" target=\"_blank\" rel=\"noopener noreferrer\" class=\"{p}-social-link\">{label}</a>\n"
        ));
    }
    out.push_str(&format!(
        "<span class=\"{p}-social-link\">📱 {}</span>\n</div>\n</div>\n</header>\n",
        who.phone
    ));
}

fn render_section(
    out: &mut String,
    d: &TemplateDescriptor,
    section: &SectionDescriptor,
    doc: &PortfolioDocument,
    who: &Identity,
) {
    let p = d.class_prefix;
    let id = section.id.as_str();
    let alt = if section.alt {
        format!(" {p}-section-alt")
    } else {
        String::new()
    };
    let accent = if d.title_accent {
        format!("<span class=\"{p}-title-accent\"></span>")
    } else {
        String::new()
    };
    out.push_str(&format!(
        "<section id=\"{id}\" class=\"{p}-section{alt}\">\n<h2 class=\"{p}-section-title\">{accent}{}</h2>\n",
        section.title
    ));

    match section.id {
        SectionId::About => {
            out.push_str(&format!("<p class=\"{p}-about-text\">{}</p>\n", who.about));
        }
        SectionId::Skills => {
            out.push_str(&format!("<div class=\"{p}-skills-grid\">\n"));
            for skill in &doc.skills {
                out.push_str(&format!(
                    "<span class=\"{p}-skill-tag\">{}</span>\n",
                    escape_html(skill)
                ));
            }
            out.push_str("</div>\n");
        }
        SectionId::Experience => {
            out.push_str(&format!("<div class=\"{p}-timeline\">\n"));
            let last = doc.experience.len().saturating_sub(1);
            for (i, job) in doc.experience.iter().enumerate() {
                render_job(out, d, job, d.timeline_connector && i < last);
            }
            out.push_str("</div>\n");
        }
        SectionId::Projects => {
            out.push_str(&format!("<div class=\"{p}-projects-grid\">\n"));
            for project in &doc.projects {
                render_project(out, d, project);
            }
            out.push_str("</div>\n");
        }
        SectionId::Education => {
            for edu in &doc.education {
                render_education(out, d, edu);
            }
        }
    }
    out.push_str("</section>\n");
}

fn with_location(d: &TemplateDescriptor, head: &str, location: &str) -> String {
    match d.location_separator {
        Some(sep) if !location.trim().is_empty() => {
            format!("{} {sep} {}", escape_html(head), escape_html(location))
        }
        _ => escape_html(head),
    }
}

fn render_job(out: &mut String, d: &TemplateDescriptor, job: &Experience, connector: bool) {
    let p = d.class_prefix;
    out.push_str(&format!("<div class=\"{p}-timeline-item\">\n"));
    if connector {
        out.push_str(&format!("<div class=\"{p}-timeline-line\"></div>\n"));
    }
    out.push_str(&format!(
        "<div class=\"{p}-timeline-marker\"></div>\n<div class=\"{p}-timeline-content\">\n\
         <div class=\"{p}-job-header\">\n<h3 class=\"{p}-job-title\">{}</h3>\n\
         <span class=\"{p}-job-period\">{}</span>\n</div>\n\
         <p class=\"{p}-job-company\">{}</p>\n",
        escape_html(&job.title),
        escape_html(&job.period),
        with_location(d, &job.company, &job.location),
    ));
    if !job.points.is_empty() {
        out.push_str(&format!("<ul class=\"{p}-job-points\">\n"));
        for point in &job.points {
            out.push_str(&format!("<li>{}</li>\n", escape_html(point)));
        }
        out.push_str("</ul>\n");
    }
    out.push_str("</div>\n</div>\n");
}

fn render_project(out: &mut String, d: &TemplateDescriptor, project: &Project) {
    let p = d.class_prefix;
    out.push_str(&format!("<div class=\"{p}-project-card\">\n"));
    match d.project_mark {
        ProjectMark::None => {}
        ProjectMark::CodeIcon => {
            out.push_str(&format!("<div class=\"{p}-project-icon\">{CODE_ICON_SVG}</div>\n"));
        }
        ProjectMark::Emoji(fallback) => {
            out.push_str(&format!(
                "<div class=\"{p}-project-emoji\">{}</div>\n",
                escape_html(or_placeholder(&project.emoji, fallback))
            ));
        }
    }
    out.push_str(&format!(
        "<h3 class=\"{p}-project-name\">{}</h3>\n<p class=\"{p}-project-description\">{}</p>\n",
        escape_html(&project.name),
        escape_html(&project.description),
    ));
    if !project.tech.is_empty() {
        out.push_str(&format!("<div class=\"{p}-project-tech\">\n"));
        for tech in &project.tech {
            out.push_str(&format!(
                "<span class=\"{p}-tech-tag\">{}</span>\n",
                escape_html(tech)
            ));
        }
        out.push_str("</div>\n");
    }
    out.push_str("</div>\n");
}

fn render_education(out: &mut String, d: &TemplateDescriptor, edu: &Education) {
    let p = d.class_prefix;
    out.push_str(&format!(
        "<div class=\"{p}-education-item\">\n<h3 class=\"{p}-education-degree\">{}</h3>\n\
         <p class=\"{p}-education-school\">{}</p>\n",
        escape_html(&edu.degree),
        with_location(d, &edu.school, &edu.location),
    ));

    let year = escape_html(&edu.year);
    out.push_str(&format!("<p class=\"{p}-education-year\">"));
    match d.education_year {
        YearStyle::Graduated => out.push_str(&format!("Graduated {year}")),
        YearStyle::Bare => out.push_str(&year),
        YearStyle::ClassOf => out.push_str(&format!("<span>Class of {year}</span>")),
    }
    if d.show_gpa && !edu.gpa.trim().is_empty() {
        out.push_str(&format!(" <span>GPA: {}</span>", escape_html(&edu.gpa)));
    }
    out.push_str("</p>\n</div>\n");
}

fn render_footer(out: &mut String, d: &TemplateDescriptor, who: &Identity, year: i32) {
    let p = d.class_prefix;
    out.push_str(&format!("<footer class=\"{p}-footer\">\n"));
    match d.footer {
        FooterStyle::AllRightsReserved { rule } => {
            if rule {
                out.push_str(&format!("<div class=\"{p}-footer-line\"></div>\n"));
            }
            out.push_str(&format!(
                "<p>© {year} {}. All rights reserved.</p>\n",
                who.name
            ));
        }
        FooterStyle::MadeWith => {
            out.push_str(&format!(
                "<p>Made with ❤️ by {} • © {year}</p>\n\
                 <p class=\"{p}-footer-tagline\">Let's create something amazing together!</p>\n",
                who.name
            ));
        }
    }
    out.push_str("</footer>\n");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::portfolio::Personal;

    fn full_document() -> PortfolioDocument {
        PortfolioDocument {
            personal: Personal {
                name: "Ada Lovelace".into(),
                title: "Analyst".into(),
                email: "ada@example.com".into(),
                github: "github.com/ada".into(),
                ..Default::default()
            },
            about: "First programmer.".into(),
            skills: vec!["Mathematics".into()],
            experience: vec![
                Experience {
                    title: "Collaborator".into(),
                    company: "Analytical Engine".into(),
                    location: "London".into(),
                    period: "1842 - 1843".into(),
                    points: vec!["Wrote Note G".into()],
                },
                Experience {
                    title: "Translator".into(),
                    company: "Menabrea".into(),
                    ..Default::default()
                },
            ],
            projects: vec![Project {
                name: "Bernoulli".into(),
                description: "Computes numbers".into(),
                tech: vec!["Punch cards".into()],
                emoji: String::new(),
            }],
            education: vec![Education {
                degree: "Private tutoring".into(),
                school: "Home".into(),
                year: "1835".into(),
                gpa: "4.0".into(),
                ..Default::default()
            }],
        }
    }

    #[test]
    fn test_unknown_template_falls_back_to_spark() {
        assert_eq!(Template::from_id("aurora"), Template::Aurora);
        assert_eq!(Template::from_id("NEBULA"), Template::Nebula);
        assert_eq!(Template::from_id("vaporwave"), Template::Spark);
        assert_eq!(Template::default(), Template::Spark);
    }

    #[test]
    fn test_every_descriptor_lists_sections_in_document_order() {
        for template in Template::ALL {
            let ids: Vec<SectionId> = template.descriptor().sections.iter().map(|s| s.id).collect();
            assert_eq!(ids, SectionId::ALL.to_vec(), "{template}");
            assert_eq!(template.descriptor().template, template);
        }
    }

    #[test]
    fn test_empty_sections_are_omitted_but_about_stays() {
        let doc = PortfolioDocument::default();
        for template in Template::ALL {
            let html = render_fragment(template, &doc, 2026);
            assert!(html.contains("id=\"about\""), "{template}");
            assert!(html.contains(PLACEHOLDER_ABOUT));
            for id in ["skills", "experience", "projects", "education"] {
                assert!(!html.contains(&format!("id=\"{id}\"")), "{template} rendered {id}");
            }
            assert!(html.contains(PLACEHOLDER_NAME));
        }
    }

    #[test]
    fn test_populated_sections_render_their_text() {
        let doc = full_document();
        for template in Template::ALL {
            let html = render_fragment(template, &doc, 2026);
            for text in ["First programmer.", "Mathematics", "Wrote Note G", "Computes numbers", "Private tutoring"] {
                assert!(html.contains(text), "{template} is missing {text}");
            }
            assert!(html.contains("href=\"https://github.com/ada\""));
            assert!(!html.contains("LinkedIn"));
            assert!(html.contains("2026"));
        }
    }

    #[test]
    fn test_per_template_details() {
        let doc = full_document();

        let aurora = render_fragment(Template::Aurora, &doc, 2026);
        assert!(aurora.contains("Analytical Engine • London"));
        assert!(aurora.contains("Graduated 1835"));
        assert!(!aurora.contains("GPA"));

        let nebula = render_fragment(Template::Nebula, &doc, 2026);
        assert!(nebula.contains("<p class=\"nebula-job-company\">Analytical Engine</p>"));
        assert!(nebula.contains("<p class=\"nebula-education-year\">1835</p>"));
        assert_eq!(nebula.matches("nebula-timeline-line").count(), 1);

        let spark = render_fragment(Template::Spark, &doc, 2026);
        assert!(spark.contains("Analytical Engine · London"));
        assert!(spark.contains("Class of 1835"));
        assert!(spark.contains("GPA: 4.0"));
        assert!(spark.contains("<div class=\"spark-project-emoji\">🚀</div>"));
        assert!(spark.contains("Superpowers"));
    }

    #[test]
    fn test_document_text_is_escaped() {
        let mut doc = full_document();
        doc.personal.name = "<script>alert('x')</script>".into();
        doc.personal.website = "example.com\" onmouseover=\"x".into();
        doc.skills = vec!["C & C++".into()];

        let html = render_fragment(Template::Aurora, &doc, 2026);
        assert!(!html.contains("<script>"));
        assert!(html.contains("&lt;script&gt;alert(&#39;x&#39;)&lt;/script&gt;"));
        assert!(html.contains("C &amp; C++"));
        assert!(html.contains("https://example.com&quot; onmouseover=&quot;x"));
    }

    #[test]
    fn test_render_is_deterministic_for_fixed_year() {
        let doc = full_document();
        assert_eq!(
            render_fragment(Template::Nebula, &doc, 2030),
            render_fragment(Template::Nebula, &doc, 2030)
        );
    }
}
