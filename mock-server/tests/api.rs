use axum::http::{self, Request, StatusCode};
use http_body_util::BodyExt;
use mock_server::{app, Page, Product, Supplier};
use tower::ServiceExt;

const DETRAN: &str = r#"{"name":"Detran","description":"Consulta de veiculos","requestUrl":"https://detran.example/ws","method":"POST","postBody":"{\"placa\":\"ABC1234\"}"}"#;

async fn body_json<T: serde::de::DeserializeOwned>(response: axum::response::Response) -> T {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

async fn body_bytes(response: axum::response::Response) -> bytes::Bytes {
    response.into_body().collect().await.unwrap().to_bytes()
}

fn json_request(method: &str, uri: &str, body: &str) -> Request<String> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(http::header::CONTENT_TYPE, "application/json")
        .body(body.to_string())
        .unwrap()
}

fn empty_request(method: &str, uri: &str) -> Request<String> {
    Request::builder().method(method).uri(uri).body(String::new()).unwrap()
}

// --- list ---

#[tokio::test]
async fn list_suppliers_empty() {
    let resp = app().oneshot(empty_request("GET", "/supplier")).await.unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let page: Page<Supplier> = body_json(resp).await;
    assert!(page.content.is_empty());
}

// --- create ---

#[tokio::test]
async fn create_supplier_returns_201() {
    let resp = app().oneshot(json_request("POST", "/supplier", DETRAN)).await.unwrap();

    assert_eq!(resp.status(), StatusCode::CREATED);
    let supplier: Supplier = body_json(resp).await;
    assert_eq!(supplier.id, 1);
    assert_eq!(supplier.name, "Detran");
    assert_eq!(supplier.post_body.as_deref(), Some(r#"{"placa":"ABC1234"}"#));
}

#[tokio::test]
async fn create_supplier_missing_name_returns_422() {
    let resp = app()
        .oneshot(json_request("POST", "/supplier", r#"{"requestUrl":"https://detran.example"}"#))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn create_supplier_short_name_returns_422() {
    let resp = app()
        .oneshot(json_request(
            "POST",
            "/supplier",
            r#"{"name":"D","description":"Consulta de veiculos","requestUrl":"https://detran.example/ws"}"#,
        ))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

// --- get ---

#[tokio::test]
async fn get_supplier_not_found() {
    let resp = app().oneshot(empty_request("GET", "/supplier/99")).await.unwrap();
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn get_supplier_bad_id_returns_400() {
    let resp = app().oneshot(empty_request("GET", "/supplier/not-a-number")).await.unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

// --- update ---

#[tokio::test]
async fn update_supplier_without_id_returns_400() {
    let resp = app().oneshot(json_request("PUT", "/supplier", DETRAN)).await.unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn update_supplier_not_found() {
    let body = DETRAN.replacen('{', r#"{"id":42,"#, 1);
    let resp = app().oneshot(json_request("PUT", "/supplier", &body)).await.unwrap();
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

// --- delete ---

#[tokio::test]
async fn delete_supplier_not_found() {
    let resp = app().oneshot(empty_request("DELETE", "/supplier/7")).await.unwrap();
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

// --- full CRUD lifecycle ---

#[tokio::test]
async fn crud_lifecycle() {
    use tower::Service;

    let mut app = app().into_service();

    // create
    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(json_request("POST", "/supplier", DETRAN))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::CREATED);
    let created: Supplier = body_json(resp).await;
    let id = created.id;

    // list
    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(empty_request("GET", "/supplier"))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let page: Page<Supplier> = body_json(resp).await;
    assert_eq!(page.content.len(), 1);
    assert_eq!(page.content[0].id, id);

    // update: switch to an XML body
    let xml_body = r#"<?xml version=\"1.0\" encoding=\"UTF-8\"?><XmlInputConsulta><placa>ABC1234</placa></XmlInputConsulta>"#;
    let update = format!(
        r#"{{"id":{id},"name":"Detran SP","description":"Consulta de veiculos","requestUrl":"https://detran.example/ws","method":"POST","postBody":"{xml_body}"}}"#
    );
    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(json_request("PUT", "/supplier", &update))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let updated: Supplier = body_json(resp).await;
    assert_eq!(updated.name, "Detran SP");
    assert!(updated.post_body.unwrap().contains("<placa>ABC1234</placa>"));

    // get
    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(empty_request("GET", &format!("/supplier/{id}")))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let fetched: Supplier = body_json(resp).await;
    assert_eq!(fetched.name, "Detran SP");

    // delete
    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(empty_request("DELETE", &format!("/supplier/{id}")))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::NO_CONTENT);
    let body = body_bytes(resp).await;
    assert!(body.is_empty());

    // get after delete
    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(empty_request("GET", &format!("/supplier/{id}")))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    // ids are not reused
    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(json_request("POST", "/supplier", DETRAN))
        .await
        .unwrap();
    let recreated: Supplier = body_json(resp).await;
    assert_eq!(recreated.id, id + 1);
}

// --- products ---

#[tokio::test]
async fn list_products_empty() {
    let resp = app().oneshot(empty_request("GET", "/product")).await.unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let page: Page<Product> = body_json(resp).await;
    assert!(page.content.is_empty());
}

#[tokio::test]
async fn create_product_with_unknown_supplier_returns_422() {
    let resp = app()
        .oneshot(json_request("POST", "/product", r#"{"name":"Completa","supplierIds":[9]}"#))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn create_product_short_name_returns_422() {
    let resp = app()
        .oneshot(json_request("POST", "/product", r#"{"name":"ab"}"#))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn update_product_without_id_returns_400() {
    let resp = app()
        .oneshot(json_request("PUT", "/product", r#"{"name":"Completa"}"#))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn get_and_delete_missing_product_return_404() {
    let resp = app().oneshot(empty_request("GET", "/product/3")).await.unwrap();
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    let resp = app().oneshot(empty_request("DELETE", "/product/3")).await.unwrap();
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn product_lifecycle_expands_suppliers() {
    use tower::Service;

    let mut app = app().into_service();

    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(json_request("POST", "/supplier", DETRAN))
        .await
        .unwrap();
    let supplier: Supplier = body_json(resp).await;

    // create
    let create = format!(
        r#"{{"name":"Consulta completa","totalPrice":9.9,"totalCost":0.5,"supplierIds":[{}],"standardResponse":{{"status":"ok"}}}}"#,
        supplier.id
    );
    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(json_request("POST", "/product", &create))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::CREATED);
    let created: Product = body_json(resp).await;
    assert_eq!(created.id, 1);
    assert_eq!(created.supplier_list.len(), 1);
    assert_eq!(created.supplier_list[0].name, "Detran");

    // update: unlink the supplier
    let update = format!(r#"{{"id":{},"name":"Consulta simples","supplierIds":[]}}"#, created.id);
    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(json_request("PUT", "/product", &update))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let updated: Product = body_json(resp).await;
    assert_eq!(updated.name, "Consulta simples");
    assert!(updated.supplier_list.is_empty());
    assert!(updated.standard_response.is_none());

    // list
    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(empty_request("GET", "/product"))
        .await
        .unwrap();
    let page: Page<Product> = body_json(resp).await;
    assert_eq!(page.content.len(), 1);

    // delete
    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(empty_request("DELETE", &format!("/product/{}", created.id)))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::NO_CONTENT);

    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(empty_request("GET", &format!("/product/{}", created.id)))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}
