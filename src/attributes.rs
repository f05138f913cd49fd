//! Per-node attribute view used during inflation.

use tracing::trace;

use crate::error::InflateError;
use crate::traits::{AttributeResolver, ResourceIndex};
use crate::types::{AttrName, I18nPolicy, ResId, ResourceNode, ResourceRef, is_indirect};

/// Queryable view over one node's attributes, created fresh for each node.
pub struct AttributeSet<'a> {
    node: &'a ResourceNode,
    index: &'a dyn ResourceIndex,
    policy: &'a I18nPolicy,
    strict: bool,
}

impl<'a> AttributeSet<'a> {
    pub fn new(
        node: &'a ResourceNode,
        index: &'a dyn ResourceIndex,
        policy: &'a I18nPolicy,
        strict: bool,
    ) -> Self {
        AttributeSet {
            node,
            index,
            policy,
            strict,
        }
    }

    pub fn is_strict(&self) -> bool {
        self.strict
    }

    fn invalid(
        &self,
        namespace: &str,
        key: &str,
        value: &str,
        reason: impl Into<String>,
    ) -> InflateError {
        InflateError::InvalidAttribute {
            attribute: AttrName::new(namespace, key).to_string(),
            value: value.to_string(),
            reason: reason.into(),
        }
    }
}

fn parse_int(value: &str) -> Option<i32> {
    let value = value.trim();
    match value
        .strip_prefix("0x")
        .or_else(|| value.strip_prefix("0X"))
    {
        Some(hex) => u32::from_str_radix(hex, 16).ok().map(|v| v as i32),
        None => value.parse().ok(),
    }
}

impl AttributeResolver for AttributeSet<'_> {
    fn get_string(&self, namespace: &str, key: &str) -> Option<&str> {
        self.node.attribute(namespace, key)
    }

    fn get_int(&self, namespace: &str, key: &str, default: i32) -> Result<i32, InflateError> {
        match self.get_string(namespace, key) {
            None => Ok(default),
            Some(value) => parse_int(value)
                .ok_or_else(|| self.invalid(namespace, key, value, "not an integer")),
        }
    }

    fn get_resource_id(
        &self,
        namespace: &str,
        key: &str,
        default: ResId,
    ) -> Result<ResId, InflateError> {
        let Some(value) = self.get_string(namespace, key) else {
            return Ok(default);
        };
        if is_indirect(value) {
            let reference: ResourceRef = value.parse()?;
            let id = self
                .index
                .resource_id(&reference)
                .ok_or_else(|| InflateError::UnknownResource(reference.qualified_name()))?;
            trace!(event = "Attribute", reference = %reference, id);
            return Ok(id);
        }
        parse_int(value)
            .ok_or_else(|| self.invalid(namespace, key, value, "not a resource reference or id"))
    }

    fn validate_strict_i18n(&self) -> Result<(), InflateError> {
        self.node
            .attributes()
            .iter()
            .try_for_each(|(name, value)| self.policy.check(name, value))
    }
}
