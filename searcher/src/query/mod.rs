//! Query definition, assembly and execution.

mod builder;

pub use builder::QueryBuilder;

use serde_json::{Map, Value};
use tracing::{debug, instrument};

use crate::parsers::{ArrayResultParser, ResultParser};
use crate::searcher::Searcher;
use crate::SearcherError;
use searcher_shared::QueryRequest;

/// A kind of query.
///
/// `configure` registers the indices and types to search and sets the body,
/// reading any caller supplied data through the builder. It runs once per
/// assembly, always against a fresh builder.
pub trait QueryVariant: Send + Sync {
    fn configure(&self, query: &mut QueryBuilder<'_>) -> Result<(), SearcherError>;
}

/// A query bound to a searcher, ready to be assembled and run.
///
/// `P` is the result parser the raw response is handed to. Running consumes
/// the query, so every instance executes at most once.
pub struct Query<'s, V, P = ArrayResultParser> {
    searcher: &'s Searcher,
    variant: V,
    data: Map<String, Value>,
    result_parser: P,
}

impl<'s, V: QueryVariant> Query<'s, V, ArrayResultParser> {
    /// Create a query parsing its results with [`ArrayResultParser`].
    pub fn new(searcher: &'s Searcher, variant: V) -> Self {
        Self {
            searcher,
            variant,
            data: Map::new(),
            result_parser: ArrayResultParser::new(),
        }
    }
}

impl<'s, V: QueryVariant, P: ResultParser> Query<'s, V, P> {
    /// Merge data into the query. Existing keys are overwritten.
    pub fn add_data<I, K>(&mut self, data: I)
    where
        I: IntoIterator<Item = (K, Value)>,
        K: Into<String>,
    {
        self.data
            .extend(data.into_iter().map(|(key, value)| (key.into(), value)));
    }

    /// Add a single data entry, builder style.
    pub fn with_data(mut self, key: impl Into<String>, value: Value) -> Self {
        self.data.insert(key.into(), value);
        self
    }

    /// Data value for `key`, `None` if the key is unknown.
    pub fn data(&self, key: &str) -> Option<&Value> {
        self.data.get(key)
    }

    pub fn all_data(&self) -> &Map<String, Value> {
        &self.data
    }

    pub fn variant(&self) -> &V {
        &self.variant
    }

    pub fn result_parser(&self) -> &P {
        &self.result_parser
    }

    /// Parse the results of this query with another strategy.
    pub fn parse_results_with<Q: ResultParser>(self, result_parser: Q) -> Query<'s, V, Q> {
        Query {
            searcher: self.searcher,
            variant: self.variant,
            data: self.data,
            result_parser,
        }
    }

    /// The request that would be sent to the search engine.
    ///
    /// Configures the variant and assembles the request without executing it.
    pub fn raw_query(&self) -> Result<QueryRequest, SearcherError> {
        let mut builder = QueryBuilder::new(self.searcher.indices_manager(), &self.data);
        self.variant.configure(&mut builder)?;
        builder.build(self.searcher.fragments())
    }

    /// Build and execute the query.
    ///
    /// # Returns
    ///
    /// * `Ok(P)` - The result parser holding the raw response
    /// * `Err(SearcherError)` - If assembly fails, or `Execution` with the
    ///   client error unchanged if the search itself fails
    #[instrument(skip_all)]
    pub async fn run(self) -> Result<P, SearcherError> {
        let request = self.raw_query()?;

        let raw_results = self.searcher.client().search(&request).await?;
        debug!(index = %request.index, "Query executed");

        let mut result_parser = self.result_parser;
        result_parser.set_raw_results(raw_results);

        Ok(result_parser)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fragments::{fragment_ref, Term};
    use crate::indices::NamedIndex;
    use crate::parsers::HitsResultParser;
    use crate::test_support::MockClient;
    use searcher_repository::SearchError;
    use serde_json::json;
    use std::sync::Arc;

    struct MatchAllProducts;

    impl QueryVariant for MatchAllProducts {
        fn configure(&self, query: &mut QueryBuilder<'_>) -> Result<(), SearcherError> {
            query.search_in("products", None)?;
            query.set_body(json!({"query": {"match_all": {}}}));
            Ok(())
        }
    }

    /// Searches for the `term` data value, optionally restricted to in-stock items.
    struct ProductSearch;

    impl QueryVariant for ProductSearch {
        fn configure(&self, query: &mut QueryBuilder<'_>) -> Result<(), SearcherError> {
            query.search_in("products", Some("product"))?;
            query.search_in("archive", Some("product"))?;

            let term = query.data("term").cloned().unwrap_or(Value::Null);
            let mut filters = Vec::new();
            if query.data("in_stock") == Some(&json!(true)) {
                filters.push(fragment_ref("in_stock"));
            }

            query.set_body(json!({
                "query": {
                    "bool": {
                        "must": [{"match": {"name": term}}],
                        "filter": filters
                    }
                }
            }));
            Ok(())
        }
    }

    enum CatalogQuery {
        Everything,
        Brand(String),
    }

    impl QueryVariant for CatalogQuery {
        fn configure(&self, query: &mut QueryBuilder<'_>) -> Result<(), SearcherError> {
            match self {
                CatalogQuery::Everything => {}
                CatalogQuery::Brand(brand) => {
                    query.search_in_index("products")?;
                    query.set_body(json!({"query": {"term": {"brand": brand}}}));
                }
            }
            Ok(())
        }
    }

    fn searcher(client: MockClient) -> Searcher {
        let mut searcher = Searcher::new(Arc::new(client));
        searcher
            .register_index(NamedIndex::new("products"))
            .register_index(NamedIndex::new("archive"))
            .register_fragment("in_stock", Term::new("in_stock", true));
        searcher
    }

    #[test]
    fn test_raw_query_end_to_end() {
        let searcher = searcher(MockClient::new());
        let query = Query::new(&searcher, MatchAllProducts);

        let request = query.raw_query().unwrap();

        assert_eq!(
            serde_json::to_value(&request).unwrap(),
            json!({"index": "products", "body": {"query": {"match_all": {}}}})
        );
    }

    #[test]
    fn test_raw_query_is_repeatable() {
        let searcher = searcher(MockClient::new());
        let query = Query::new(&searcher, ProductSearch).with_data("term", json!("lamp"));

        let first = query.raw_query().unwrap();
        let second = query.raw_query().unwrap();

        assert_eq!(first, second);
        assert_eq!(first.index, "products,archive");
        assert_eq!(first.doc_type.as_deref(), Some("product"));
    }

    #[test]
    fn test_data_drives_configuration() {
        let searcher = searcher(MockClient::new());
        let mut query = Query::new(&searcher, ProductSearch);
        query.add_data([("term", json!("lamp")), ("in_stock", json!(true))]);

        let request = query.raw_query().unwrap();

        assert_eq!(
            request.body,
            json!({
                "query": {
                    "bool": {
                        "must": [{"match": {"name": "lamp"}}],
                        "filter": [{"term": {"in_stock": true}}]
                    }
                }
            })
        );
    }

    #[test]
    fn test_add_data_last_write_wins() {
        let searcher = searcher(MockClient::new());
        let mut query = Query::new(&searcher, MatchAllProducts);

        query.add_data([("a", json!(1))]);
        query.add_data([("a", json!(2)), ("c", json!("x"))]);

        assert_eq!(query.data("a"), Some(&json!(2)));
        assert_eq!(query.data("b"), None);
        assert_eq!(query.all_data().len(), 2);
    }

    #[test]
    fn test_enum_variants() {
        let searcher = searcher(MockClient::new());

        let everything = Query::new(&searcher, CatalogQuery::Everything)
            .raw_query()
            .unwrap();
        let brand = Query::new(&searcher, CatalogQuery::Brand("acme".to_string()))
            .raw_query()
            .unwrap();

        assert_eq!(everything.index, "_all");
        assert!(everything.doc_type.is_none());
        assert_eq!(brand.index, "products");
        assert_eq!(brand.body, json!({"query": {"term": {"brand": "acme"}}}));
    }

    #[test]
    fn test_unknown_index_aborts_assembly() {
        struct OrdersQuery;

        impl QueryVariant for OrdersQuery {
            fn configure(&self, query: &mut QueryBuilder<'_>) -> Result<(), SearcherError> {
                query.search_in("orders", None)
            }
        }

        let searcher = searcher(MockClient::new());

        let result = Query::new(&searcher, OrdersQuery).raw_query();

        assert!(matches!(result, Err(SearcherError::UnknownIndex(name)) if name == "orders"));
    }

    #[test]
    fn test_unknown_fragment_aborts_assembly() {
        struct Broken;

        impl QueryVariant for Broken {
            fn configure(&self, query: &mut QueryBuilder<'_>) -> Result<(), SearcherError> {
                query.set_body(json!({"query": fragment_ref("nope")}));
                Ok(())
            }
        }

        let searcher = searcher(MockClient::new());

        let result = Query::new(&searcher, Broken).raw_query();

        assert!(matches!(result, Err(SearcherError::UnknownFragment(name)) if name == "nope"));
    }

    #[tokio::test]
    async fn test_run_sends_request_and_returns_parser() {
        let response = json!({"hits": {"total": 1, "hits": [{"_id": "1", "_source": {"name": "Desk lamp"}}]}});
        let client = MockClient::returning(response.clone());
        let recorded = client.recorded();
        let searcher = searcher(client);

        let results = Query::new(&searcher, MatchAllProducts).run().await.unwrap();

        assert_eq!(results.results(), &response);
        let requests = recorded.lock().await;
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].index, "products");
        assert!(requests[0].doc_type.is_none());
    }

    #[tokio::test]
    async fn test_run_with_custom_parser() {
        let client = MockClient::returning(json!({
            "hits": {"total": {"value": 1}, "hits": [{"_id": "7", "_source": {"name": "Desk lamp"}}]}
        }));
        let searcher = searcher(client);

        let results = Query::new(&searcher, MatchAllProducts)
            .parse_results_with(HitsResultParser::new())
            .run()
            .await
            .unwrap();

        assert_eq!(results.ids(), vec!["7"]);
        assert_eq!(results.total(), Some(1));
    }

    #[tokio::test]
    async fn test_run_propagates_client_error() {
        let error = SearchError::connection("connection refused");
        let searcher = searcher(MockClient::failing(error.clone()));

        let result = Query::new(&searcher, MatchAllProducts).run().await;

        match result {
            Err(SearcherError::Execution(e)) => assert_eq!(e, error),
            other => panic!("expected execution error, got {:?}", other.map(|_| ())),
        }
    }

    #[tokio::test]
    async fn test_run_does_not_call_client_when_assembly_fails() {
        struct Broken;

        impl QueryVariant for Broken {
            fn configure(&self, query: &mut QueryBuilder<'_>) -> Result<(), SearcherError> {
                query.search_in("orders", None)
            }
        }

        let client = MockClient::new();
        let recorded = client.recorded();
        let searcher = searcher(client);

        let result = Query::new(&searcher, Broken).run().await;

        assert!(matches!(result, Err(SearcherError::UnknownIndex(_))));
        assert!(recorded.lock().await.is_empty());
    }
}
