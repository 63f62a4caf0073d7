//! Declared permission requirements
//!
//! Requirements are attached to a whole resource or to one operation of it and
//! are read by the authorization gate. Declaring a requirement never enforces
//! anything on its own.

use super::types::OperationKey;
use crate::config::OperationDeclaration;
use crate::utils::error::{ClubhouseError, Result};
use actix_web::http::Method;
use std::collections::{HashMap, HashSet};

/// One segment of a route pattern
#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    Literal(String),
    /// `{name}`, matches any single non-empty segment
    Param,
}

/// HTTP route bound to an operation
#[derive(Debug, Clone)]
pub struct RouteBinding {
    pub method: Method,
    pub pattern: String,
    pub operation: OperationKey,
    segments: Vec<Segment>,
}

impl RouteBinding {
    fn matches(&self, method: &Method, path: &str) -> bool {
        if &self.method != method {
            return false;
        }

        let parts = split_path(path);
        parts.len() == self.segments.len()
            && self.segments.iter().zip(parts).all(|(segment, part)| match segment {
                Segment::Literal(literal) => literal == part,
                Segment::Param => !part.is_empty(),
            })
    }

    fn literal_count(&self) -> usize {
        self.segments
            .iter()
            .filter(|s| matches!(s, Segment::Literal(_)))
            .count()
    }

    /// Pattern with parameter names erased, used to detect conflicting bindings
    fn shape(&self) -> String {
        self.segments
            .iter()
            .map(|s| match s {
                Segment::Literal(literal) => literal.as_str(),
                Segment::Param => "{}",
            })
            .collect::<Vec<_>>()
            .join("/")
    }
}

fn split_path(path: &str) -> Vec<&str> {
    let trimmed = path.trim_start_matches('/').trim_end_matches('/');
    if trimmed.is_empty() {
        Vec::new()
    } else {
        trimmed.split('/').collect()
    }
}

fn parse_pattern(pattern: &str) -> Result<Vec<Segment>> {
    if !pattern.starts_with('/') {
        return Err(ClubhouseError::config(format!(
            "Route pattern must start with '/': {}",
            pattern
        )));
    }

    split_path(pattern)
        .into_iter()
        .map(|part| {
            if let Some(inner) = part.strip_prefix('{').and_then(|p| p.strip_suffix('}')) {
                if inner.is_empty() || inner.contains(['{', '}']) {
                    return Err(ClubhouseError::config(format!(
                        "Malformed route parameter '{}' in {}",
                        part, pattern
                    )));
                }
                Ok(Segment::Param)
            } else if part.is_empty() || part.contains(['{', '}']) {
                Err(ClubhouseError::config(format!(
                    "Malformed route segment '{}' in {}",
                    part, pattern
                )))
            } else {
                Ok(Segment::Literal(part.to_string()))
            }
        })
        .collect()
}

/// Frozen set of permission declarations and route bindings
#[derive(Debug, Clone, Default)]
pub struct PermissionRegistry {
    resource_requirements: HashMap<String, Vec<String>>,
    operation_requirements: HashMap<OperationKey, Vec<String>>,
    bindings: Vec<RouteBinding>,
    protected_prefixes: Vec<Vec<String>>,
}

impl PermissionRegistry {
    pub fn builder() -> PermissionRegistryBuilder {
        PermissionRegistryBuilder::default()
    }

    /// Permissions required by an operation
    ///
    /// Resource-level requirements come first, then operation-level ones, each
    /// in declaration order. A permission declared twice is listed once.
    pub fn requirements(&self, operation: &OperationKey) -> Vec<String> {
        let resource_level = self
            .resource_requirements
            .get(&operation.resource)
            .into_iter()
            .flatten();
        let operation_level = self
            .operation_requirements
            .get(operation)
            .into_iter()
            .flatten();

        let mut seen = HashSet::new();
        resource_level
            .chain(operation_level)
            .filter(|p| seen.insert(p.as_str()))
            .cloned()
            .collect()
    }

    /// Operation served by `method path`
    ///
    /// When several patterns match, the one with the most literal segments wins,
    /// then the one bound first.
    pub fn operation_for(&self, method: &Method, path: &str) -> Option<&OperationKey> {
        let mut best: Option<&RouteBinding> = None;
        for binding in self.bindings.iter().filter(|b| b.matches(method, path)) {
            if best.is_none_or(|current| binding.literal_count() > current.literal_count()) {
                best = Some(binding);
            }
        }
        best.map(|b| &b.operation)
    }

    pub fn bindings(&self) -> &[RouteBinding] {
        &self.bindings
    }

    /// Whether `path` lies below a prefix where every route must be bound
    pub fn is_protected(&self, path: &str) -> bool {
        let parts = split_path(path);
        self.protected_prefixes.iter().any(|prefix| {
            parts.len() >= prefix.len() && prefix.iter().zip(&parts).all(|(p, part)| p == part)
        })
    }

    /// Number of resources and operations with at least one requirement
    pub fn declared_count(&self) -> usize {
        self.resource_requirements.len() + self.operation_requirements.len()
    }
}

/// Accumulates declarations; repeated calls append and never overwrite
#[derive(Debug, Clone, Default)]
pub struct PermissionRegistryBuilder {
    resource_requirements: Vec<(String, String)>,
    operation_requirements: Vec<(OperationKey, String)>,
    bindings: Vec<(String, String, OperationKey)>,
    protected_prefixes: Vec<String>,
}

impl PermissionRegistryBuilder {
    /// Deny requests below `prefix` that match no bound route
    pub fn protect_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.protected_prefixes.push(prefix.into());
        self
    }

    /// Require `permission` for every operation of `resource`
    pub fn require_for_resource(
        mut self,
        resource: impl Into<String>,
        permission: impl Into<String>,
    ) -> Self {
        self.resource_requirements
            .push((resource.into(), permission.into()));
        self
    }

    /// Require `permission` for one operation
    pub fn require(
        mut self,
        resource: impl Into<String>,
        operation: impl Into<String>,
        permission: impl Into<String>,
    ) -> Self {
        self.operation_requirements
            .push((OperationKey::new(resource, operation), permission.into()));
        self
    }

    /// Bind an HTTP route pattern such as `/api/roles/{id}` to an operation
    pub fn bind_route(
        mut self,
        method: impl Into<String>,
        pattern: impl Into<String>,
        resource: impl Into<String>,
        operation: impl Into<String>,
    ) -> Self {
        self.bindings.push((
            method.into(),
            pattern.into(),
            OperationKey::new(resource, operation),
        ));
        self
    }

    /// Merge declarations supplied by configuration
    pub fn declare_all(mut self, declarations: &[OperationDeclaration]) -> Self {
        for declaration in declarations {
            let resource = declaration.resource.clone();
            match &declaration.operation {
                Some(operation) => {
                    for permission in &declaration.permissions {
                        self = self.require(resource.clone(), operation.clone(), permission.clone());
                    }
                    if let Some(route) = &declaration.route {
                        self = self.bind_route(
                            route.method.clone(),
                            route.path.clone(),
                            resource.clone(),
                            operation.clone(),
                        );
                    }
                }
                None => {
                    for permission in &declaration.permissions {
                        self = self.require_for_resource(resource.clone(), permission.clone());
                    }
                }
            }
        }
        self
    }

    /// Validate and freeze the declarations
    pub fn build(self) -> Result<PermissionRegistry> {
        let mut registry = PermissionRegistry::default();

        for (resource, permission) in self.resource_requirements {
            check_name("resource", &resource)?;
            check_name("permission", &permission)?;
            registry
                .resource_requirements
                .entry(resource)
                .or_default()
                .push(permission);
        }

        for (operation, permission) in self.operation_requirements {
            check_operation(&operation)?;
            check_name("permission", &permission)?;
            registry
                .operation_requirements
                .entry(operation)
                .or_default()
                .push(permission);
        }

        let mut shapes = HashSet::new();
        for (method, pattern, operation) in self.bindings {
            check_operation(&operation)?;
            let method = Method::from_bytes(method.trim().to_uppercase().as_bytes())
                .map_err(|_| ClubhouseError::config(format!("Invalid HTTP method: {}", method)))?;
            let binding = RouteBinding {
                segments: parse_pattern(&pattern)?,
                method,
                pattern,
                operation,
            };

            if !shapes.insert((binding.method.clone(), binding.shape())) {
                return Err(ClubhouseError::config(format!(
                    "Route {} {} is bound twice",
                    binding.method, binding.pattern
                )));
            }
            registry.bindings.push(binding);
        }

        for prefix in self.protected_prefixes {
            let literals = parse_pattern(&prefix)?
                .into_iter()
                .map(|segment| match segment {
                    Segment::Literal(literal) => Ok(literal),
                    Segment::Param => Err(ClubhouseError::config(format!(
                        "Protected prefix must be literal: {}",
                        prefix
                    ))),
                })
                .collect::<Result<Vec<_>>>()?;
            registry.protected_prefixes.push(literals);
        }

        Ok(registry)
    }
}

fn check_name(kind: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(ClubhouseError::config(format!(
            "Permission declaration has an empty {} name",
            kind
        )));
    }
    Ok(())
}

fn check_operation(operation: &OperationKey) -> Result<()> {
    check_name("resource", &operation.resource)?;
    check_name("operation", &operation.operation)
}
