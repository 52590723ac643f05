pub mod gross_profit_selector;
pub mod hidden_gem_filter;
pub mod sales_presence_filter;
pub mod seller_rank_selector;
