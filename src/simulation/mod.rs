pub mod random_deal;
