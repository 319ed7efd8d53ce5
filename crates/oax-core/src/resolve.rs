use std::collections::HashMap;

use indexmap::IndexMap;
use serde::de::DeserializeOwned;

use crate::error::ResolveError;
use crate::parse::components::Components;
use crate::parse::operation::{Operation, PathItem};
use crate::parse::parameter::ParameterOrRef;
use crate::parse::request_body::{Content, RequestBody};
use crate::parse::response::ResponseOrRef;
use crate::parse::schema::Schema;
use crate::parse::spec::Specification;
use crate::raw::RawDocument;

/// Resolve every `$ref` in `spec` against the raw document it was parsed from.
///
/// Returns a new specification; `spec` is left untouched. Any failure aborts
/// the whole resolution.
pub fn resolve(spec: &Specification, raw: &RawDocument) -> Result<Specification, ResolveError> {
    RefResolver::new(raw).resolve_spec(spec)
}

/// Replaces reference markers with the typed content of their targets,
/// following chains transitively. References currently being expanded are
/// kept on a stack; meeting one of them again is reported as a cycle.
pub struct RefResolver<'a> {
    raw: &'a RawDocument,
    stack: Vec<String>,
    schemas: HashMap<String, Schema>,
}

impl<'a> RefResolver<'a> {
    pub fn new(raw: &'a RawDocument) -> Self {
        Self {
            raw,
            stack: Vec::new(),
            schemas: HashMap::new(),
        }
    }

    pub fn resolve_spec(&mut self, spec: &Specification) -> Result<Specification, ResolveError> {
        let mut resolved = spec.clone();

        for item in resolved.paths.values_mut() {
            self.resolve_path_item(item)?;
        }

        if let Some(components) = &spec.components {
            resolved.components = Some(self.resolve_components(components)?);
        }

        Ok(resolved)
    }

    fn resolve_path_item(&mut self, item: &mut PathItem) -> Result<(), ResolveError> {
        item.parameters = self.resolve_parameters(&item.parameters)?;

        for op in [
            &mut item.get,
            &mut item.put,
            &mut item.post,
            &mut item.delete,
        ]
        .into_iter()
        .flatten()
        {
            self.resolve_operation(op)?;
        }
        Ok(())
    }

    fn resolve_operation(&mut self, op: &mut Operation) -> Result<(), ResolveError> {
        op.parameters = self.resolve_parameters(&op.parameters)?;

        if let Some(body) = &op.request_body {
            op.request_body = Some(self.resolve_request_body(body)?);
        }

        let mut responses = IndexMap::with_capacity(op.responses.len());
        for (status, resp) in &op.responses {
            responses.insert(status.clone(), self.resolve_response_or_ref(resp)?);
        }
        op.responses = responses;

        Ok(())
    }

    fn resolve_components(&mut self, components: &Components) -> Result<Components, ResolveError> {
        let mut resolved = components.clone();

        for (name, schema) in &components.schemas {
            resolved
                .schemas
                .insert(name.clone(), self.resolve_schema(schema)?);
        }
        for (name, param) in &components.parameters {
            resolved
                .parameters
                .insert(name.clone(), self.resolve_parameter_or_ref(param)?);
        }
        for (name, body) in &components.request_bodies {
            resolved
                .request_bodies
                .insert(name.clone(), self.resolve_request_body(body)?);
        }
        for (name, resp) in &components.responses {
            resolved
                .responses
                .insert(name.clone(), self.resolve_response_or_ref(resp)?);
        }

        Ok(resolved)
    }

    /// Resolve a schema and, recursively, all of its properties and items.
    pub fn resolve_schema(&mut self, schema: &Schema) -> Result<Schema, ResolveError> {
        if let Some(reference) = &schema.reference {
            if let Some(cached) = self.schemas.get(reference) {
                return Ok(cached.clone());
            }
            let resolved =
                self.follow(reference, |this, target: Schema| this.resolve_schema(&target))?;
            self.schemas.insert(reference.clone(), resolved.clone());
            return Ok(resolved);
        }

        let mut resolved = schema.clone();

        let mut properties = IndexMap::with_capacity(schema.properties.len());
        for (name, prop) in &schema.properties {
            properties.insert(name.clone(), self.resolve_schema(prop)?);
        }
        resolved.properties = properties;

        resolved.items = schema
            .items
            .as_deref()
            .map(|items| self.resolve_schema(items))
            .transpose()?
            .map(Box::new);

        Ok(resolved)
    }

    fn resolve_parameters(
        &mut self,
        params: &[ParameterOrRef],
    ) -> Result<Vec<ParameterOrRef>, ResolveError> {
        params
            .iter()
            .map(|p| self.resolve_parameter_or_ref(p))
            .collect()
    }

    fn resolve_parameter_or_ref(
        &mut self,
        param: &ParameterOrRef,
    ) -> Result<ParameterOrRef, ResolveError> {
        match param {
            ParameterOrRef::Ref { ref_path } => {
                self.follow(ref_path, |this, target: ParameterOrRef| {
                    this.resolve_parameter_or_ref(&target)
                })
            }
            ParameterOrRef::Parameter(p) => {
                let mut resolved = p.clone();
                if let Some(schema) = &p.schema {
                    resolved.schema = Some(self.resolve_schema(schema)?);
                }
                Ok(ParameterOrRef::Parameter(resolved))
            }
        }
    }

    fn resolve_request_body(&mut self, body: &RequestBody) -> Result<RequestBody, ResolveError> {
        if let Some(reference) = &body.reference {
            return self.follow(reference, |this, target: RequestBody| {
                this.resolve_request_body(&target)
            });
        }

        let mut resolved = body.clone();
        resolved.content = self.resolve_content(&body.content)?;
        Ok(resolved)
    }

    fn resolve_response_or_ref(
        &mut self,
        resp: &ResponseOrRef,
    ) -> Result<ResponseOrRef, ResolveError> {
        match resp {
            ResponseOrRef::Ref { ref_path } => {
                self.follow(ref_path, |this, target: ResponseOrRef| {
                    this.resolve_response_or_ref(&target)
                })
            }
            ResponseOrRef::Response(r) => {
                let mut resolved = r.clone();
                resolved.content = self.resolve_content(&r.content)?;
                Ok(ResponseOrRef::Response(resolved))
            }
        }
    }

    fn resolve_content(
        &mut self,
        content: &IndexMap<String, Content>,
    ) -> Result<IndexMap<String, Content>, ResolveError> {
        let mut resolved = IndexMap::with_capacity(content.len());
        for (media_type, entry) in content {
            let mut entry = entry.clone();
            if let Some(schema) = &entry.schema {
                entry.schema = Some(self.resolve_schema(schema)?);
            }
            resolved.insert(media_type.clone(), entry);
        }
        Ok(resolved)
    }

    /// Look up `reference`, decode its target as `T` and hand it to `then`
    /// with the reference pushed on the expansion stack.
    fn follow<T, R>(
        &mut self,
        reference: &str,
        then: impl FnOnce(&mut Self, T) -> Result<R, ResolveError>,
    ) -> Result<R, ResolveError>
    where
        T: DeserializeOwned,
    {
        if let Some(pos) = self.stack.iter().position(|r| r == reference) {
            let mut chain = self.stack[pos..].to_vec();
            chain.push(reference.to_string());
            return Err(ResolveError::CircularReference {
                reference: reference.to_string(),
                chain,
            });
        }

        let raw = self.raw;
        let node = raw.lookup(reference)?;
        let target: T =
            serde_yaml_ng::from_value(node.clone()).map_err(|e| ResolveError::InvalidTarget {
                reference: reference.to_string(),
                message: e.to_string(),
            })?;
        log::debug!("resolved {reference}");

        self.stack.push(reference.to_string());
        let result = then(self, target);
        self.stack.pop();
        result
    }
}
