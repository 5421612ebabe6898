use crate::error::Error;

/// Immutable routing configuration.
///
/// The base path is stripped off every request before the first remaining
/// segment is taken as the resource name. The template maps that resource
/// name to a controller type name; `{}` stands for the capitalized resource,
/// so the default `{}` template maps `discussions` to `Discussions` and a
/// `{}Controller` template maps it to `DiscussionsController`.
#[derive(Clone, Debug)]
pub struct Config {
    base: Vec<String>,
    template: String,
}

impl Config {
    /// Build a configuration from a base path and a controller name
    /// template. Fails if the template has no `{}` placeholder.
    pub fn new(base_path: &str, template: &str) -> Result<Self, Error> {
        if !template.contains("{}") {
            return Err(Error::template(template));
        }

        let base = base_path
            .split('/')
            .filter(|segment| !segment.is_empty())
            .map(str::to_owned)
            .collect();

        Ok(Self {
            base,
            template: template.to_owned(),
        })
    }

    /// Strip the base path off a request's segments, or `None` when the
    /// request lives outside the base path.
    pub(crate) fn strip<'req>(&self, segments: &'req [String]) -> Option<&'req [String]> {
        if segments.len() < self.base.len() {
            return None;
        }
        let (head, rest) = segments.split_at(self.base.len());
        head.iter().eq(self.base.iter()).then_some(rest)
    }

    /// The controller type name for a resource segment.
    pub(crate) fn type_name(&self, resource: &str) -> String {
        let mut capitalized = String::with_capacity(resource.len());
        let mut chars = resource.chars();
        if let Some(first) = chars.next() {
            capitalized.extend(first.to_uppercase());
            capitalized.push_str(chars.as_str());
        }
        self.template.replacen("{}", &capitalized, 1)
    }
}

/// A root base path and the bare `{}` template.
impl Default for Config {
    fn default() -> Self {
        Self {
            base: Vec::new(),
            template: "{}".to_owned(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn segments(path: &str) -> Vec<String> {
        path.split('/')
            .filter(|s| !s.is_empty())
            .map(str::to_owned)
            .collect()
    }

    #[test]
    fn type_name() {
        let config = Config::default();
        assert_eq!(config.type_name("discussions"), "Discussions");

        let config = Config::new("/", "{}Controller").unwrap();
        assert_eq!(config.type_name("discussions"), "DiscussionsController");
    }

    #[test]
    fn template_needs_placeholder() {
        let err = Config::new("/", "Controller").unwrap_err();
        assert_eq!(
            err.to_string(),
            "controller name template 'Controller' has no '{}'"
        );
    }

    #[test]
    fn strips_base_path() {
        let config = Config::new("/forum", "{}").unwrap();

        let segs = segments("/forum/discussions/123");
        assert_eq!(config.strip(&segs).unwrap(), segments("/discussions/123"));

        let segs = segments("/blog/discussions");
        assert!(config.strip(&segs).is_none());

        let segs = segments("/forum");
        assert!(config.strip(&segs).unwrap().is_empty());
    }

    #[test]
    fn root_base_path_strips_nothing() {
        let config = Config::default();
        let segs = segments("/discussions");
        assert_eq!(config.strip(&segs).unwrap(), segments("/discussions"));
    }
}
