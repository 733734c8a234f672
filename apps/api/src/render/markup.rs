//! View model → HTML.
//!
//! Templates are compiled into the binary and registered under `.html` names,
//! which turns on minijinja's HTML auto-escaping for every interpolated value.

use minijinja::{context, Environment, UndefinedBehavior};
use serde::Serialize;

use crate::render::selector::RoleOption;
use crate::render::view::RoleView;

const DESCRIPTION: &str = "description.html";
const RESPONSIBILITIES: &str = "responsibilities.html";
const MAPPING: &str = "mapping.html";
const PAGE: &str = "page.html";
const ERROR_PAGE: &str = "error.html";

/// Markup for the three output regions. All empty for an empty selection.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Fragments {
    pub description: String,
    pub responsibilities: String,
    pub mapping: String,
}

#[derive(Debug, Clone)]
pub struct Markup {
    env: Environment<'static>,
}

impl Markup {
    pub fn new(title: &str, relevance_heading: &str) -> Result<Self, minijinja::Error> {
        let mut env = Environment::new();
        env.set_undefined_behavior(UndefinedBehavior::Strict);
        env.add_template(DESCRIPTION, include_str!("../../templates/description.html"))?;
        env.add_template(
            RESPONSIBILITIES,
            include_str!("../../templates/responsibilities.html"),
        )?;
        env.add_template(MAPPING, include_str!("../../templates/mapping.html"))?;
        env.add_template(PAGE, include_str!("../../templates/page.html"))?;
        env.add_template(ERROR_PAGE, include_str!("../../templates/error.html"))?;
        env.add_global("title", title.to_string());
        env.add_global("relevance_heading", relevance_heading.to_string());
        Ok(Self { env })
    }

    pub fn render_fragments(&self, view: &RoleView) -> Result<Fragments, minijinja::Error> {
        if view.is_empty() {
            return Ok(Fragments::default());
        }

        let description = self
            .env
            .get_template(DESCRIPTION)?
            .render(context! { descriptions => &view.descriptions })?;
        let responsibilities = self
            .env
            .get_template(RESPONSIBILITIES)?
            .render(context! { responsibilities => &view.responsibilities })?;
        let mapping = self
            .env
            .get_template(MAPPING)?
            .render(context! { tiers => &view.tiers })?;

        Ok(Fragments {
            description,
            responsibilities,
            mapping,
        })
    }

    /// Full page shell with the selector populated and regions pre-rendered.
    pub fn render_page(
        &self,
        options: &[RoleOption],
        fragments: &Fragments,
    ) -> Result<String, minijinja::Error> {
        self.env
            .get_template(PAGE)?
            .render(context! { options => options, fragments => fragments })
    }

    /// Page shown when the mapping document failed to load.
    pub fn render_error_page(&self, message: &str) -> Result<String, minijinja::Error> {
        self.env
            .get_template(ERROR_PAGE)?
            .render(context! { message => message })
    }
}
