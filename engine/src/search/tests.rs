use chrono::{NaiveDate, NaiveDateTime};
use proptest::prelude::*;

use crate::{
    config::SearchConfig,
    data::{
        address::Address,
        business::Business,
        card::{CardSection, MarketplaceCard},
        sale_listing::{SaleListing, SaleListingFilter},
        user::{User, UserRole},
        EntityId,
    },
    lexer::{
        lexer::QueryLexer,
        scoring::Weights,
        tokenizer::{StringTokenizer, Tokenable},
    },
    search::{search, PageRequest, SearchEngine, SearchError, SortOrder, SortRequest},
};

fn businesses(names: &[&str]) -> Vec<Business> {
    names
        .iter()
        .enumerate()
        .map(|(i, name)| Business::new(i as EntityId + 1, name))
        .collect()
}

fn ids(query: &str, candidates: &[Business]) -> Vec<EntityId> {
    search(query, candidates, 1, 100, "default", "").unwrap().ids()
}

fn day(date: &str) -> NaiveDateTime {
    NaiveDate::parse_from_str(date, "%Y-%m-%d")
        .unwrap()
        .and_hms_opt(0, 0, 0)
        .unwrap()
}

fn users() -> Vec<User> {
    vec![
        User::new(1, "Wen", "Chin", "wen.chin@example.com")
            .with_middle_name("Wui")
            .with_nickname("Tai"),
        User::new(2, "Mei", "Ru", "meiru@example.com").with_role(UserRole::GlobalAdmin),
        User::new(3, "John", "Smith", "john@example.com").with_nickname("John Smith"),
        User::new(4, "Dave", "smith", "dave@example.com"),
        User::new(5, "angus", "Smith", "angus@example.com"),
    ]
}

fn listings() -> Vec<SaleListing> {
    let listing = |id, product: &str, business: &str, city: &str, price, closes: &str, expires: &str| SaleListing {
        sale_item_id: id,
        product_name: product.to_string(),
        business_name: business.to_string(),
        business_type: "Retail Trade".to_string(),
        address: Address::new(city, "New Zealand"),
        price,
        quantity: id,
        created: day("2021-05-01"),
        closes: Some(day(closes)),
        expires: Some(day(expires).date()),
        sold: false,
    };
    let mut sold = listing(4, "Apple Juice", "Fresh Foods", "Nelson", 4.0, "2021-06-20", "2021-06-25");
    sold.sold = true;
    vec![
        listing(1, "Apple Pie", "Pie Place", "Christchurch", 12.5, "2021-06-01", "2021-06-20"),
        listing(2, "Apple Crumble", "Fresh Foods", "Auckland", 8.0, "2021-06-15", "2021-06-05"),
        listing(3, "Pear Tart", "Pie Place", "Christchurch", 9.0, "2021-07-01", "2021-06-12"),
        sold,
    ]
}

#[test]
fn test_example_query_requires_all_terms() {
    let candidates = businesses(&["David Centre", "David Test Centre"]);
    let result = search("David test centre", &candidates, 1, 10, "default", "").unwrap();
    assert_eq!(result.ids(), vec![2]);
    assert_eq!(result.total_matches, 1);
}

#[test]
fn test_empty_query_matches_all() {
    let candidates = businesses(&["A", "B", "C", "D"]);
    for query in ["", "    ", "and OR", "\"   \""] {
        let result = search(query, &candidates, 1, 2, "default", "").unwrap();
        assert_eq!(result.total_matches, 4);
        assert_eq!(result.ids(), vec![1, 2]);
    }
}

#[test]
fn test_quoted_phrase_is_exact() {
    let candidates = businesses(&["John Smith", "John Smithson", "Smith John", "Jo"]);
    assert_eq!(ids("\"john smith\"", &candidates), vec![1]);
    assert_eq!(ids("john smith", &candidates), vec![1, 2, 3]);
}

#[test]
fn test_phrase_and_bare_words_tie_under_default_weights() {
    let candidates = businesses(&["John Smith"]);
    let score = |query: &str, weights| {
        QueryLexer::compile(query, weights)
            .evaluate_one(&candidates[0])
            .score
    };

    let defaults = Weights::default();
    assert_eq!(score("\"John Smith\"", defaults), 2);
    assert_eq!(score("John Smith", defaults), 2);

    let heavier = Weights { exact: 3, partial: 1 };
    assert_eq!(score("\"John Smith\"", heavier), 3);
    assert_eq!(score("John Smith", heavier), 2);
}

#[test]
fn test_heavier_exact_weight_breaks_phrase_tie() {
    let candidates = businesses(&["Mary Jones", "John Smith"]);
    // "Mary Jones" scores two partial hits, "John Smith" one exact hit
    let query = "\"John Smith\" OR Jones OR Mary";
    let page = PageRequest::new(1, 10).unwrap();

    let result = SearchEngine::default()
        .search(query, &candidates, page, &SortRequest::Relevance)
        .unwrap();
    assert_eq!(result.ids(), vec![1, 2]);

    let heavier = SearchEngine::new(SearchConfig {
        exact_weight: 3,
        ..SearchConfig::default()
    });
    let result = heavier
        .search(query, &candidates, page, &SortRequest::Relevance)
        .unwrap();
    assert_eq!(result.ids(), vec![2, 1]);
}

#[test]
fn test_exact_hit_ranks_above_partial_hits() {
    let candidates = users();
    let result = search("smith OR \"John Smith\"", &candidates, 1, 10, "default", "").unwrap();
    // nickname "John Smith" is exact (2) plus the partial "smith" (1)
    assert_eq!(result.ids(), vec![3, 4, 5]);
}

#[test]
fn test_fold_is_left_to_right() {
    let candidates = businesses(&[
        "John Parker",
        "William Smith",
        "John Smith",
        "Henry Jones",
        "Mary Smith",
        "William Brown",
    ]);
    let flat = ids("John OR William AND Smith OR Henry", &candidates);
    assert_eq!(flat, vec![2, 3, 4]);
    // Reading AND before OR would have matched John Parker too
    assert!(!flat.contains(&1));
}

#[test]
fn test_stray_operators_are_ignored() {
    let candidates = businesses(&["David Test Centre", "David Centre", "Test Kitchen"]);
    assert_eq!(
        ids("AND OR AND David test", &candidates),
        ids("David test", &candidates)
    );
    assert_eq!(
        ids("David OR OR test AND", &candidates),
        ids("David OR test", &candidates)
    );
}

#[test]
fn test_operators_are_case_insensitive_but_quotes_make_terms() {
    let candidates = businesses(&["Fish or Chips", "Fish", "Chips"]);
    assert_eq!(ids("Fish or Chips", &candidates), vec![1, 2, 3]);
    assert_eq!(ids("Fish \"or\" Chips", &candidates), Vec::<EntityId>::new());
    assert_eq!(ids("\"Fish or Chips\"", &candidates), vec![1]);
}

#[test]
fn test_total_is_independent_of_slice() {
    let candidates = businesses(&["Pie A", "Pie B", "Pie C", "Pie D", "Pie E"]);
    let first = search("pie", &candidates, 1, 3, "default", "").unwrap();
    let second = search("pie", &candidates, 2, 3, "default", "").unwrap();
    let beyond = search("pie", &candidates, 9, 3, "default", "").unwrap();
    assert_eq!(first.ids(), vec![1, 2, 3]);
    assert_eq!(second.ids(), vec![4, 5]);
    assert!(beyond.is_empty());
    for result in [&first, &second, &beyond] {
        assert_eq!(result.total_matches, 5);
        assert_eq!(result.page_count(3), 2);
    }
}

#[test]
fn test_default_ordering_is_stable_for_equal_scores() {
    let candidates = businesses(&["Bakery 9", "Bakery 3", "Bakery 7", "Best Bakery 1"]);
    assert_eq!(ids("bakery", &candidates), vec![1, 2, 3, 4]);
    assert_eq!(ids("bakery OR best", &candidates), vec![4, 1, 2, 3]);
}

#[test]
fn test_field_sort_orders() {
    let candidates = users();
    let asc = search("smith", &candidates, 1, 10, "firstName", "asc").unwrap();
    // Case-sensitive: uppercase sorts before lowercase
    assert_eq!(asc.ids(), vec![4, 3, 5]);
    let desc = search("smith", &candidates, 1, 10, "firstName", "DESC").unwrap();
    assert_eq!(desc.ids(), vec![5, 3, 4]);
}

#[test]
fn test_field_sort_ties_keep_candidate_order() {
    let candidates = users();
    let result = search("", &candidates, 1, 10, "role", "asc").unwrap();
    assert_eq!(result.ids(), vec![2, 1, 3, 4, 5]);
    let result = search("", &candidates, 1, 10, "role", "desc").unwrap();
    assert_eq!(result.ids(), vec![1, 3, 4, 5, 2]);
}

#[test]
fn test_absent_sort_values_come_first_ascending() {
    let candidates = users();
    let result = search("", &candidates, 1, 10, "nickname", "asc").unwrap();
    assert_eq!(result.ids(), vec![2, 4, 5, 3, 1]);
}

#[test]
fn test_unsupported_sort_key_is_an_error() {
    let candidates = users();
    let err = search("smith", &candidates, 1, 10, "password", "asc").unwrap_err();
    assert_eq!(
        err,
        SearchError::UnsupportedSortKey {
            entity: "user",
            key: "password".to_string()
        }
    );
    assert_eq!(err.to_string(), "Cannot sort user results by 'password'");
    // Raised even when nothing would match
    assert!(search("zzz", &candidates, 1, 10, "password", "asc").is_err());
}

#[test]
fn test_invalid_paging_is_an_error() {
    let candidates = users();
    assert_eq!(
        search("", &candidates, 0, 10, "default", "").unwrap_err(),
        SearchError::InvalidPage(0)
    );
    assert_eq!(
        search("", &candidates, 1, 0, "default", "").unwrap_err(),
        SearchError::InvalidPerPage(0)
    );
}

#[test]
fn test_sale_listing_search_fields() {
    let candidates = listings();
    let engine = SearchEngine::default();
    let page = PageRequest::new(1, 10).unwrap();
    let result = engine
        .search("christchurch", &candidates, page, &SortRequest::Relevance)
        .unwrap();
    assert_eq!(result.ids(), vec![1, 3]);
    let result = engine
        .search("\"Fresh Foods\"", &candidates, page, &SortRequest::Relevance)
        .unwrap();
    // The unfiltered path still includes sold listings
    assert_eq!(result.ids(), vec![2, 4]);
}

#[test]
fn test_sale_listing_filters_apply_before_matching() {
    let candidates = listings();
    let engine = SearchEngine::default();
    let page = PageRequest::new(1, 10).unwrap();
    let by_price = SortRequest::field("price", SortOrder::Asc);

    let result = engine
        .search_filtered("apple", &candidates, &SaleListingFilter::new(), page, &by_price)
        .unwrap();
    assert_eq!(result.ids(), vec![2, 1]);
    assert_eq!(result.total_matches, 2);

    let window = SaleListingFilter::new()
        .closing_between(Some("2021-06-10"), None)
        .unwrap()
        .price_between(None, Some(10.0));
    let result = engine
        .search_filtered("", &candidates, &window, page, &by_price)
        .unwrap();
    assert_eq!(result.ids(), vec![2, 3]);
}

#[test]
fn test_expires_sort_follows_item_expiry() {
    let candidates = listings();
    // Closing order is 1, 2, 4, 3 but expiry order is 2, 3, 1, 4
    let result = search("", &candidates, 1, 10, "expires", "asc").unwrap();
    assert_eq!(result.ids(), vec![2, 3, 1, 4]);
    let result = search("", &candidates, 1, 10, "expires", "desc").unwrap();
    assert_eq!(result.ids(), vec![4, 1, 3, 2]);
}

#[test]
fn test_invalid_filter_fails_the_search() {
    let candidates = listings();
    let filter = SaleListingFilter::new().price_between(Some(10.0), Some(1.0));
    let err = SearchEngine::default()
        .search_filtered(
            "apple",
            &candidates,
            &filter,
            PageRequest::new(1, 10).unwrap(),
            &SortRequest::Relevance,
        )
        .unwrap_err();
    assert!(matches!(err, SearchError::InvalidPriceRange { .. }));
}

#[test]
fn test_card_search_and_sort() {
    let card = |id, section, title: &str, keywords: &[&str], created: &str| MarketplaceCard {
        card_id: id,
        creator_id: 1,
        section,
        title: title.to_string(),
        description: Some("Pick up only".to_string()),
        keywords: keywords.iter().map(|k| k.to_string()).collect(),
        created: day(created),
        display_period_end: day(created) + chrono::Duration::days(14),
    };
    let candidates = vec![
        card(1, CardSection::ForSale, "Old couch", &["Furniture"], "2021-08-01"),
        card(2, CardSection::Wanted, "Desk wanted", &["furniture", "Office"], "2021-08-03"),
        card(3, CardSection::Exchange, "Bike swap", &["Vehicle"], "2021-08-02"),
    ];
    let result = search("\"furniture\"", &candidates, 1, 10, "created", "desc").unwrap();
    assert_eq!(result.ids(), vec![2, 1]);
    let result = search("pick", &candidates, 1, 10, "section", "asc").unwrap();
    assert_eq!(result.ids(), vec![3, 1, 2]);
}

#[test]
fn test_custom_weights_change_ranking() {
    let candidates = businesses(&["Pie Place", "pie"]);
    let default_engine = SearchEngine::default();
    let page = PageRequest::new(1, 10).unwrap();
    let result = default_engine
        .search("pie OR \"pie\"", &candidates, page, &SortRequest::Relevance)
        .unwrap();
    assert_eq!(result.ids(), vec![2, 1]);

    let flat = SearchEngine::new(SearchConfig {
        exact_weight: 0,
        ..SearchConfig::default()
    });
    let result = flat
        .search("pie OR \"pie\"", &candidates, page, &SortRequest::Relevance)
        .unwrap();
    assert_eq!(result.ids(), vec![1, 2]);
}

#[test]
fn test_result_serialization() {
    let candidates = businesses(&["Pie Place"]);
    let result = search("pie", &candidates, 1, 10, "default", "").unwrap();
    let json = serde_json::to_value(&result).unwrap();
    assert_eq!(json["totalMatches"], 1);
    assert_eq!(json["page"][0]["name"], "Pie Place");
    assert_eq!(json["page"][0]["id"], 1);
}

proptest! {
    #[test]
    fn prop_total_matches_ignores_paging(
        names in prop::collection::vec("[a-c]{1,4}( [a-c]{1,4})?", 0..30),
        query in "[a-c \"]{0,8}",
        page in 1u64..6,
        per_page in 1u64..8,
    ) {
        let refs: Vec<&str> = names.iter().map(String::as_str).collect();
        let candidates = businesses(&refs);
        let everything = search(&query, &candidates, 1, 1000, "default", "").unwrap();
        let sliced = search(&query, &candidates, page, per_page, "default", "").unwrap();
        prop_assert_eq!(sliced.total_matches, everything.total_matches);
        prop_assert!(sliced.page.len() as u64 <= per_page);
        let start = ((page - 1) * per_page) as usize;
        let expected: Vec<EntityId> = everything
            .ids()
            .into_iter()
            .skip(start)
            .take(per_page as usize)
            .collect();
        prop_assert_eq!(sliced.ids(), expected);
    }

    #[test]
    fn prop_rendered_query_searches_identically(
        names in prop::collection::vec("[a-c]{1,4}", 1..12),
        query in "[a-c \"]{0,10}",
    ) {
        let refs: Vec<&str> = names.iter().map(String::as_str).collect();
        let candidates = businesses(&refs);
        let rendered = StringTokenizer::render(&StringTokenizer::tokenize(&query));
        prop_assert_eq!(
            search(&query, &candidates, 1, 100, "default", "").unwrap().ids(),
            search(&rendered, &candidates, 1, 100, "default", "").unwrap().ids()
        );
    }
}
