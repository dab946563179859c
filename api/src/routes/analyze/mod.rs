pub mod analyze_route;
