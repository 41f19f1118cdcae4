mod tour_scenarios;
