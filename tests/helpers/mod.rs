pub mod mock_deliverer;
