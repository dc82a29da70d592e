//! API documentation as data: one `OperationDoc` per route, turned into an
//! OpenAPI document with the utoipa builders. The Person schema comes from the
//! entity mapping, so the docs and the table stay in step.

use crate::config::{EntityMapping, FieldKind, PERSON};
use serde_json::{json, Value};
use std::collections::BTreeMap;
use utoipa::openapi::content::ContentBuilder;
use utoipa::openapi::path::{
    HttpMethod, OperationBuilder, ParameterBuilder, ParameterIn, PathItemBuilder,
};
use utoipa::openapi::request_body::RequestBodyBuilder;
use utoipa::openapi::response::ResponseBuilder;
use utoipa::openapi::schema::{
    ArrayBuilder, KnownFormat, ObjectBuilder, Schema, SchemaFormat, Type,
};
use utoipa::openapi::tag::TagBuilder;
use utoipa::openapi::{
    ComponentsBuilder, InfoBuilder, OpenApi, OpenApiBuilder, PathsBuilder, Ref, RefOr, Required,
};

pub const OPENAPI_PATH: &str = "/api-docs/openapi.json";
pub const TAG_NAME: &str = "People";
pub const TAG_DESCRIPTION: &str = "Endpoints for managing people";
const JSON: &str = "application/json";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
    Put,
    Delete,
}

impl Method {
    pub fn as_str(self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
            Method::Put => "PUT",
            Method::Delete => "DELETE",
        }
    }

    fn http_method(self) -> HttpMethod {
        match self {
            Method::Get => HttpMethod::Get,
            Method::Post => HttpMethod::Post,
            Method::Put => HttpMethod::Put,
            Method::Delete => HttpMethod::Delete,
        }
    }
}

/// Shape of a response body.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BodyShape {
    Empty,
    Person,
    PersonList,
}

#[derive(Clone, Copy, Debug)]
pub struct ResponseDoc {
    pub status: u16,
    pub description: &'static str,
    pub body: BodyShape,
    /// Operation id the response links to, passing the returned person's id.
    pub link: Option<&'static str>,
}

#[derive(Clone, Copy, Debug)]
pub struct OperationDoc {
    pub operation_id: &'static str,
    pub method: Method,
    pub path: &'static str,
    pub summary: &'static str,
    pub description: &'static str,
    /// Description of the `{id}` path parameter, when the path has one.
    pub id_param: Option<&'static str>,
    /// Whether the operation takes a Person JSON body.
    pub request_body: bool,
    pub responses: &'static [ResponseDoc],
}

const INTERNAL_ERROR: ResponseDoc = ResponseDoc {
    status: 500,
    description: "Internal error",
    body: BodyShape::Empty,
    link: None,
};

const NOT_FOUND: ResponseDoc = ResponseDoc {
    status: 404,
    description: "Not found",
    body: BodyShape::Empty,
    link: None,
};

const BAD_REQUEST: ResponseDoc = ResponseDoc {
    status: 400,
    description: "Malformed id",
    body: BodyShape::Empty,
    link: None,
};

pub static PEOPLE_OPERATIONS: &[OperationDoc] = &[
    OperationDoc {
        operation_id: "all",
        method: Method::Get,
        path: "/people",
        summary: "Finds all people",
        description: "Finds all people.",
        id_param: None,
        request_body: false,
        responses: &[
            ResponseDoc {
                status: 200,
                description: "Success",
                body: BodyShape::PersonList,
                link: None,
            },
            INTERNAL_ERROR,
        ],
    },
    OperationDoc {
        operation_id: "get",
        method: Method::Get,
        path: "/people/{id}",
        summary: "Finds a person",
        description: "Finds a person by their Id.",
        id_param: Some("The Id of the person to find."),
        request_body: false,
        responses: &[
            ResponseDoc {
                status: 200,
                description: "Success",
                body: BodyShape::Person,
                link: None,
            },
            BAD_REQUEST,
            NOT_FOUND,
            INTERNAL_ERROR,
        ],
    },
    OperationDoc {
        operation_id: "post",
        method: Method::Post,
        path: "/people",
        summary: "Adds a new person",
        description: "Adds a new person by passing in a JSON representation of the person.",
        id_param: None,
        request_body: true,
        responses: &[
            ResponseDoc {
                status: 201,
                description: "Created",
                body: BodyShape::Person,
                link: Some("get"),
            },
            INTERNAL_ERROR,
        ],
    },
    OperationDoc {
        operation_id: "put",
        method: Method::Put,
        path: "/people/{id}",
        summary: "Updates a person's information",
        description: "Updates a person's information by passing in their Id and a JSON representation of the updated person.",
        id_param: Some("The Id of the person to update."),
        request_body: true,
        responses: &[
            ResponseDoc {
                status: 200,
                description: "Updated",
                body: BodyShape::Person,
                link: Some("get"),
            },
            BAD_REQUEST,
            NOT_FOUND,
            INTERNAL_ERROR,
        ],
    },
    OperationDoc {
        operation_id: "delete",
        method: Method::Delete,
        path: "/people/{id}",
        summary: "Deletes a person",
        description: "Deletes a person by their Id.",
        id_param: Some("The Id of the person to delete."),
        request_body: false,
        responses: &[
            ResponseDoc {
                status: 204,
                description: "Deleted",
                body: BodyShape::Empty,
                link: None,
            },
            BAD_REQUEST,
            NOT_FOUND,
            INTERNAL_ERROR,
        ],
    },
];

fn field_schema(kind: FieldKind, description: &str) -> ObjectBuilder {
    let builder = ObjectBuilder::new().description(Some(description));
    match kind {
        FieldKind::Uuid => builder
            .schema_type(Type::String)
            .format(Some(SchemaFormat::KnownFormat(KnownFormat::Uuid))),
        FieldKind::Text => builder.schema_type(Type::String),
    }
}

/// Object schema with one property per mapped field. Every field is required in
/// responses; the key is server-assigned.
pub fn entity_schema(mapping: &EntityMapping) -> Schema {
    let mut object = ObjectBuilder::new().schema_type(Type::Object);
    for f in mapping.fields {
        object = object
            .property(f.field, RefOr::T(Schema::Object(field_schema(f.kind, f.description).build())))
            .required(f.field);
    }
    Schema::Object(object.build())
}

fn person_ref() -> RefOr<Schema> {
    RefOr::Ref(Ref::from_schema_name(PERSON.entity))
}

fn body_schema(shape: BodyShape) -> Option<RefOr<Schema>> {
    match shape {
        BodyShape::Empty => None,
        BodyShape::Person => Some(person_ref()),
        BodyShape::PersonList => Some(RefOr::T(Schema::Array(
            ArrayBuilder::new().items(person_ref()).build(),
        ))),
    }
}

fn build_operation(op: &OperationDoc) -> utoipa::openapi::path::Operation {
    let mut builder = OperationBuilder::new()
        .operation_id(Some(op.operation_id))
        .summary(Some(op.summary))
        .description(Some(op.description))
        .tag(TAG_NAME);

    if let Some(description) = op.id_param {
        let key = PERSON.primary_key();
        builder = builder.parameter(
            ParameterBuilder::new()
                .name(key.field)
                .parameter_in(ParameterIn::Path)
                .required(Required::True)
                .description(Some(description))
                .schema(Some(RefOr::T(Schema::Object(
                    field_schema(key.kind, key.description).build(),
                ))))
                .build(),
        );
    }

    if op.request_body {
        builder = builder.request_body(Some(
            RequestBodyBuilder::new()
                .content(JSON, ContentBuilder::new().schema(Some(person_ref())).build())
                .required(Some(Required::True))
                .build(),
        ));
    }

    for r in op.responses {
        let mut response = ResponseBuilder::new().description(r.description);
        if let Some(schema) = body_schema(r.body) {
            response = response.content(JSON, ContentBuilder::new().schema(Some(schema)).build());
        }
        builder = builder.response(r.status.to_string(), response.build());
    }
    builder.build()
}

/// OpenAPI document for `operations`, grouped by path. Response links are
/// not part of it; see [`openapi_document`].
pub fn build_openapi(operations: &[OperationDoc]) -> OpenApi {
    let mut by_path: BTreeMap<&str, PathItemBuilder> = BTreeMap::new();
    for op in operations {
        let item = by_path.remove(op.path).unwrap_or_else(PathItemBuilder::new);
        by_path.insert(op.path, item.operation(op.method.http_method(), build_operation(op)));
    }
    let paths = by_path
        .into_iter()
        .fold(PathsBuilder::new(), |paths, (path, item)| paths.path(path, item.build()))
        .build();

    OpenApiBuilder::new()
        .info(
            InfoBuilder::new()
                .title("People API")
                .version(env!("CARGO_PKG_VERSION"))
                .description(Some("Create, read, update and delete people."))
                .build(),
        )
        .paths(paths)
        .components(Some(
            ComponentsBuilder::new()
                .schema(PERSON.entity, RefOr::T(entity_schema(&PERSON)))
                .build(),
        ))
        .tags(Some(vec![TagBuilder::new()
            .name(TAG_NAME)
            .description(Some(TAG_DESCRIPTION))
            .build()]))
        .build()
}

/// JSON pointer to the response `status` of the `method` operation on `path`.
fn response_pointer(path: &str, method: Method, status: u16) -> String {
    let escape = |s: &str| s.replace('~', "~0").replace('/', "~1");
    format!(
        "/paths/{}/{}/responses/{}",
        escape(path),
        method.as_str().to_lowercase(),
        status
    )
}

/// Link object passing the returned person's key to `target`.
fn link_object(target: &str) -> Value {
    let key = PERSON.primary_key().field;
    json!({
        "operationId": target,
        "parameters": { key: format!("$response.body#/{}", key) },
    })
}

/// Serialized document for `operations`, links included. utoipa's `Link`
/// serializes `operation_id` in snake case, so links are written here.
pub fn openapi_document(operations: &[OperationDoc]) -> Result<Value, serde_json::Error> {
    let mut doc = serde_json::to_value(build_openapi(operations))?;
    for op in operations {
        for r in op.responses {
            let Some(target) = r.link else { continue };
            if let Some(response) = doc.pointer_mut(&response_pointer(op.path, op.method, r.status)) {
                response["links"] = json!({ target: link_object(target) });
            }
        }
    }
    Ok(doc)
}

/// Document for the person resource.
pub fn openapi() -> Result<Value, serde_json::Error> {
    openapi_document(PEOPLE_OPERATIONS)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn doc() -> Value {
        openapi().unwrap()
    }

    #[test]
    fn every_operation_is_documented_once() {
        let doc = doc();
        for op in PEOPLE_OPERATIONS {
            let method = op.method.as_str().to_lowercase();
            let documented = &doc["paths"][op.path][method.as_str()];
            assert_eq!(documented["operationId"], op.operation_id, "{} {}", op.method.as_str(), op.path);
            assert_eq!(documented["tags"][0], TAG_NAME);
        }
        assert_eq!(doc["paths"].as_object().unwrap().len(), 2);
    }

    #[test]
    fn not_found_documented_for_keyed_operations() {
        let doc = doc();
        for method in ["get", "put", "delete"] {
            let responses = &doc["paths"]["/people/{id}"][method]["responses"];
            assert!(responses.get("404").is_some(), "{} lacks 404", method);
            assert!(responses["404"].get("content").is_none());
        }
    }

    #[test]
    fn create_links_to_get() {
        let doc = doc();
        let created = &doc["paths"]["/people"]["post"]["responses"]["201"];
        assert_eq!(created["links"]["get"]["operationId"], "get");
        assert_eq!(created["links"]["get"]["parameters"]["id"], "$response.body#/id");
        assert_eq!(
            created["content"]["application/json"]["schema"]["$ref"],
            "#/components/schemas/Person"
        );
    }

    #[test]
    fn update_links_to_get_and_links_use_camel_case() {
        let doc = doc();
        let updated = &doc["paths"]["/people/{id}"]["put"]["responses"]["200"];
        assert_eq!(updated["links"]["get"]["operationId"], "get");
        assert!(updated["links"]["get"].get("operation_id").is_none());
        assert!(doc["paths"]["/people/{id}"]["get"]["responses"]["200"].get("links").is_none());
    }

    #[test]
    fn response_pointer_escapes_path() {
        assert_eq!(
            response_pointer("/people/{id}", Method::Put, 200),
            "/paths/~1people~1{id}/put/responses/200"
        );
    }

    #[test]
    fn list_returns_array_of_people() {
        let doc = doc();
        let schema = &doc["paths"]["/people"]["get"]["responses"]["200"]["content"]["application/json"]["schema"];
        assert_eq!(schema["type"], "array");
        assert_eq!(schema["items"]["$ref"], "#/components/schemas/Person");
    }

    #[test]
    fn person_schema_follows_mapping() {
        let doc = doc();
        let person = &doc["components"]["schemas"]["Person"];
        let props = person["properties"].as_object().unwrap();
        let names: Vec<&str> = props.keys().map(String::as_str).collect();
        for f in PERSON.fields {
            assert!(names.contains(&f.field));
        }
        assert_eq!(person["properties"]["id"]["format"], "uuid");
        assert_eq!(person["required"].as_array().unwrap().len(), PERSON.fields.len());
    }
}
