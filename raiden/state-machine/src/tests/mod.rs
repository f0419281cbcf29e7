mod end_state;
