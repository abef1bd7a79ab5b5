use super::test_helpers::*;
use super::*;
use crate::endpoint::Endpoint;
use crate::models::*;
use serde_json::json;
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, ResponseTemplate};
