pub mod hybrid_dp_bnb;
